use cave_core::{MotionId, ObjId, VerbId, World, WorldResult};

/// Objects and words the engine refers to by name, resolved once from the
/// world at start-up.
#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub struct Cast {
    pub keys: ObjId,
    pub lamp: ObjId,
    pub grate: ObjId,
    pub cage: ObjId,
    pub rod: ObjId,
    pub rod2: ObjId,
    pub bird: ObjId,
    pub pillow: ObjId,
    pub snake: ObjId,
    pub fissure: ObjId,
    pub sign: ObjId,
    pub oyster: ObjId,
    pub dwarf: ObjId,
    pub bottle: ObjId,
    pub water: ObjId,
    pub oil: ObjId,
    pub mirror: ObjId,
    pub plant: ObjId,
    pub axe: ObjId,
    pub bear: ObjId,
    pub troll: ObjId,
    pub troll2: ObjId,
    pub chasm: ObjId,
    pub batteries: ObjId,
    pub ogre: ObjId,
    pub message: ObjId,
    pub emerald: ObjId,
    pub pyramid: ObjId,
    pub jade: ObjId,
    pub chain: ObjId,
    pub chest: ObjId,
    /// Only worlds with a knife object get the knife-spot message.
    pub knife: Option<ObjId>,

    pub back: MotionId,
    pub look: MotionId,
    pub cave: MotionId,
    pub null: MotionId,
    pub enter: MotionId,
    pub stream: MotionId,

    pub find: VerbId,
    pub inventory: VerbId,
}

impl Cast {
    /// Resolve every name against `world`.
    pub fn new(world: &World) -> WorldResult<Self> {
        let obj = |name: &str| world.object_named(name);
        let vocab = world.vocabulary();
        Ok(Self {
            keys: obj("keys")?,
            lamp: obj("lamp")?,
            grate: obj("grate")?,
            cage: obj("cage")?,
            rod: obj("rod")?,
            rod2: obj("rod2")?,
            bird: obj("bird")?,
            pillow: obj("pillow")?,
            snake: obj("snake")?,
            fissure: obj("fissure")?,
            sign: obj("sign")?,
            oyster: obj("oyster")?,
            dwarf: obj("dwarf")?,
            bottle: obj("bottle")?,
            water: obj("water")?,
            oil: obj("oil")?,
            mirror: obj("mirror")?,
            plant: obj("plant")?,
            axe: obj("axe")?,
            bear: obj("bear")?,
            troll: obj("troll")?,
            troll2: obj("troll2")?,
            chasm: obj("chasm")?,
            batteries: obj("batteries")?,
            ogre: obj("ogre")?,
            message: obj("message")?,
            emerald: obj("emerald")?,
            pyramid: obj("pyramid")?,
            jade: obj("jade")?,
            chain: obj("chain")?,
            chest: obj("chest")?,
            knife: obj("knife").ok(),
            back: vocab.motion("back")?,
            look: vocab.motion("look")?,
            cave: vocab.motion("cave")?,
            null: vocab.motion("null")?,
            enter: vocab.motion("enter")?,
            stream: vocab.motion("stream")?,
            find: vocab.action("find")?,
            inventory: vocab.action("inventory")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_core::{WorldData, WorldError};

    #[test]
    fn sample_cast_resolves() {
        let world = World::sample().unwrap();
        let cast = Cast::new(&world).unwrap();
        assert_eq!(cast.lamp, ObjId(2));
        assert_eq!(cast.emerald, ObjId(28));
        assert_eq!(cast.back, MotionId(8));
        assert_eq!(cast.null, MotionId(21));
        assert!(cast.knife.is_none());
    }

    #[test]
    fn missing_object_is_reported() {
        let mut data = WorldData::sample().unwrap();
        let chest = data.objects.iter_mut().find(|o| o.name == "chest").unwrap();
        chest.name = "strongbox".into();
        let world = World::from_data(data).unwrap();
        assert!(matches!(
            Cast::new(&world),
            Err(WorldError::MissingObject(name)) if name == "chest"
        ));
    }
}
