//! Closed value sets used across the domain
//!
//! Every set serializes to the same literal strings the API accepts, so the
//! validation layer and the document store agree on one spelling.

use serde::{Deserialize, Serialize};

macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Literal spellings accepted for this set, in declaration order
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(
    /// Account role
    UserRole {
        User => "user",
        Admin => "admin",
    }
);

closed_enum!(
    /// UI theme preference
    Theme {
        Light => "light",
        Dark => "dark",
        System => "system",
    }
);

closed_enum!(
    /// Role granted to a project collaborator
    CollaboratorRole {
        Editor => "editor",
        Viewer => "viewer",
    }
);

closed_enum!(
    /// Lifecycle of a project
    ProjectStatus {
        Draft => "draft",
        InProgress => "in-progress",
        Completed => "completed",
        Archived => "archived",
    }
);

closed_enum!(
    /// Measurement system used by the editor
    Units {
        Metric => "metric",
        Imperial => "imperial",
    }
);

closed_enum!(
    Currency {
        Usd => "USD",
        Eur => "EUR",
        Gbp => "GBP",
        Jpy => "JPY",
        Cad => "CAD",
        Aud => "AUD",
    }
);

closed_enum!(
    /// Category of a room; `Custom` is paired with a free-text `customType`
    RoomType {
        LivingRoom => "living-room",
        Bedroom => "bedroom",
        Bathroom => "bathroom",
        Kitchen => "kitchen",
        DiningRoom => "dining-room",
        Office => "office",
        Hallway => "hallway",
        Custom => "custom",
    }
);

closed_enum!(
    FloorMaterial {
        Hardwood => "hardwood",
        Carpet => "carpet",
        Tile => "tile",
        Concrete => "concrete",
        Marble => "marble",
        Custom => "custom",
    }
);

closed_enum!(
    /// Swing direction of a door
    OpenDirection {
        In => "in",
        Out => "out",
    }
);

closed_enum!(
    /// Category of a furniture item; `Custom` is paired with `customType`
    FurnitureType {
        Chair => "chair",
        Table => "table",
        Sofa => "sofa",
        Bed => "bed",
        Cabinet => "cabinet",
        Desk => "desk",
        Bookshelf => "bookshelf",
        Light => "light",
        Plant => "plant",
        Rug => "rug",
        Decoration => "decoration",
        Custom => "custom",
    }
);

closed_enum!(
    FurnitureMaterial {
        Wood => "wood",
        Metal => "metal",
        Fabric => "fabric",
        Leather => "leather",
        Glass => "glass",
        Plastic => "plastic",
        Custom => "custom",
    }
);

closed_enum!(
    /// Kind of asset stored in an asset library
    AssetType {
        Furniture => "furniture",
        Material => "material",
        Texture => "texture",
        Lighting => "lighting",
        Decoration => "decoration",
        Other => "other",
    }
);

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::System
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Draft
    }
}

impl Default for Units {
    fn default() -> Self {
        Units::Metric
    }
}

impl Default for FloorMaterial {
    fn default() -> Self {
        FloorMaterial::Hardwood
    }
}

impl Default for OpenDirection {
    fn default() -> Self {
        OpenDirection::In
    }
}

impl Default for AssetType {
    fn default() -> Self {
        AssetType::Furniture
    }
}

impl RoomType {
    pub fn is_custom(&self) -> bool {
        matches!(self, RoomType::Custom)
    }
}

impl FurnitureType {
    pub fn is_custom(&self) -> bool {
        matches!(self, FurnitureType::Custom)
    }
}
