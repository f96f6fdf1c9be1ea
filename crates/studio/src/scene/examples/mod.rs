//! Ready made descriptor sets, mostly for the command line frontend and tests.

pub mod room;
pub mod spheres;

pub use room::RoomScene;
pub use spheres::SpheresScene;

use crate::descriptor::Descriptors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleScene {
    Spheres,
    Room,
}

impl ExampleScene {
    pub const ALL: [ExampleScene; 2] = [Self::Spheres, Self::Room];

    pub fn name(self) -> &'static str {
        match self {
            ExampleScene::Spheres => "spheres",
            ExampleScene::Room => "room",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scene| scene.name() == name)
    }

    pub fn descriptors(self) -> Descriptors {
        let mut descriptors = Descriptors::new();
        match self {
            ExampleScene::Spheres => SpheresScene::insert_into(&mut descriptors),
            ExampleScene::Room => RoomScene::insert_into(&mut descriptors),
        }
        descriptors
    }
}
