//! Field schema for object orientation documents.
//!
//! One table maps each recognized JSON key to its semantic shape, its
//! presence rule and its documented default. Loading consults it for the
//! wording of malformed-field errors, default resolution walks it to fill
//! absent fields, and saving uses the same key constants, so the three
//! sides can never disagree.

/// JSON key names of the orientation document.
#[allow(missing_docs)]
pub mod keys {
    pub const IMAGE: &str = "image";
    pub const DUAL_IMAGE: &str = "dualImage";
    pub const LEFT_IMAGE: &str = "leftImage";
    pub const RIGHT_IMAGE: &str = "rightImage";
    pub const IMAGE_LAYERS: &str = "imageLayers";
    pub const UNLIT: &str = "unlit";
    pub const FLIP_IMAGES: &str = "flipImages";
    pub const IMAGE_POSITION: &str = "imagePosition";
    pub const FRAMES: &str = "frames";
    pub const ANIMATION_CYCLE: &str = "animationCycle";
    pub const SPACES: &str = "spaces";
    pub const SPACE_SCAN: &str = "spaceScan";
    pub const REQUIRE_TILLED_ANCHORS: &str = "requireTilledAnchors";
    pub const REQUIRE_SOIL_ANCHORS: &str = "requireSoilAnchors";
    pub const ANCHORS: &str = "anchors";
    pub const BG_ANCHORS: &str = "bgAnchors";
    pub const FG_ANCHORS: &str = "fgAnchors";
    pub const DIRECTION: &str = "direction";
    pub const COLLISION: &str = "collision";
    pub const LIGHT_POSITION: &str = "lightPosition";
    pub const POINT_ANGLE: &str = "pointAngle";
}

/// Semantic shape of a document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain string (image names).
    String,
    /// String template or boolean marker (`dualImage` appears as both).
    StringOrBool,
    /// Boolean flag.
    Bool,
    /// Any JSON number.
    Number,
    /// Integer >= 1 (`frames`).
    FrameCount,
    /// 2-element number array.
    Vec2F,
    /// Array of 2-element integer arrays.
    PointList,
    /// Array of anchor-side tags.
    TagList,
    /// Array of image layer objects.
    LayerList,
    /// `"left"` or `"right"`.
    DirectionTag,
    /// `"none"`, `"solid"` or `"platform"`.
    CollisionTag,
}

impl FieldKind {
    /// Shape description used in malformed-field errors.
    pub fn expected(self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::StringOrBool => "a string or boolean",
            FieldKind::Bool => "a boolean",
            FieldKind::Number => "a number",
            FieldKind::FrameCount => "a positive integer",
            FieldKind::Vec2F => "a 2-element number array",
            FieldKind::PointList => "an array of 2-element integer arrays",
            FieldKind::TagList => {
                "an array of anchor tags (left, bottom, right, top, background)"
            }
            FieldKind::LayerList => "an array of image layer objects",
            FieldKind::DirectionTag => "\"left\" or \"right\"",
            FieldKind::CollisionTag => "\"none\", \"solid\" or \"platform\"",
        }
    }
}

/// Documented default of an optional field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// Boolean default.
    Bool(bool),
    /// Integer count default.
    Int(u32),
    /// Floating-point default.
    Float(f64),
    /// 2D vector default.
    Vec2([f64; 2]),
    /// `"none"` collision.
    CollisionNone,
    /// Right for direction-sensitive instances, left otherwise.
    DirectionByImages,
}

/// Presence rule: what happens when the document omits the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    /// Default resolution fills the documented default.
    Defaulted(DefaultValue),
    /// No documented default; the field stays absent.
    Optional,
}

/// One row of the schema table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key of the field.
    pub key: &'static str,
    /// Shape the field must hold when present.
    pub kind: FieldKind,
    /// What default resolution does when the field is absent.
    pub presence: Presence,
}

/// Every recognized field of the orientation document. Keys not listed
/// here are ignored on load and dropped on save.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: keys::IMAGE,
        kind: FieldKind::String,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::DUAL_IMAGE,
        kind: FieldKind::StringOrBool,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::LEFT_IMAGE,
        kind: FieldKind::String,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::RIGHT_IMAGE,
        kind: FieldKind::String,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::IMAGE_LAYERS,
        kind: FieldKind::LayerList,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::UNLIT,
        kind: FieldKind::Bool,
        presence: Presence::Defaulted(DefaultValue::Bool(false)),
    },
    FieldSpec {
        key: keys::FLIP_IMAGES,
        kind: FieldKind::Bool,
        presence: Presence::Defaulted(DefaultValue::Bool(false)),
    },
    FieldSpec {
        key: keys::IMAGE_POSITION,
        kind: FieldKind::Vec2F,
        presence: Presence::Defaulted(DefaultValue::Vec2([0.0, 0.0])),
    },
    FieldSpec {
        key: keys::FRAMES,
        kind: FieldKind::FrameCount,
        presence: Presence::Defaulted(DefaultValue::Int(1)),
    },
    FieldSpec {
        key: keys::ANIMATION_CYCLE,
        kind: FieldKind::Number,
        presence: Presence::Defaulted(DefaultValue::Float(1.0)),
    },
    FieldSpec {
        key: keys::SPACES,
        kind: FieldKind::PointList,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::SPACE_SCAN,
        kind: FieldKind::Number,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::REQUIRE_TILLED_ANCHORS,
        kind: FieldKind::Bool,
        presence: Presence::Defaulted(DefaultValue::Bool(false)),
    },
    FieldSpec {
        key: keys::REQUIRE_SOIL_ANCHORS,
        kind: FieldKind::Bool,
        presence: Presence::Defaulted(DefaultValue::Bool(false)),
    },
    FieldSpec {
        key: keys::ANCHORS,
        kind: FieldKind::TagList,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::BG_ANCHORS,
        kind: FieldKind::PointList,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::FG_ANCHORS,
        kind: FieldKind::PointList,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::DIRECTION,
        kind: FieldKind::DirectionTag,
        presence: Presence::Defaulted(DefaultValue::DirectionByImages),
    },
    FieldSpec {
        key: keys::COLLISION,
        kind: FieldKind::CollisionTag,
        presence: Presence::Defaulted(DefaultValue::CollisionNone),
    },
    FieldSpec {
        key: keys::LIGHT_POSITION,
        kind: FieldKind::Vec2F,
        presence: Presence::Optional,
    },
    FieldSpec {
        key: keys::POINT_ANGLE,
        kind: FieldKind::Number,
        presence: Presence::Defaulted(DefaultValue::Float(0.0)),
    },
];

/// Table row for `key`, if the key is recognized.
pub fn spec_for(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Shape registered for `key`, if the key is recognized.
pub fn kind_of(key: &str) -> Option<FieldKind> {
    spec_for(key).map(|f| f.kind)
}

pub(crate) fn expected_for(key: &str) -> &'static str {
    kind_of(key).map(FieldKind::expected).unwrap_or("a recognized value")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_is_unique() {
        for (i, a) in FIELDS.iter().enumerate() {
            for b in &FIELDS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn kind_lookup() {
        assert_eq!(kind_of("frames"), Some(FieldKind::FrameCount));
        assert_eq!(kind_of("particleEmitter"), None);
    }

    fn presence_of(key: &str) -> Presence {
        spec_for(key).expect("recognized key").presence
    }

    #[test]
    fn presence_rules_match_documented_defaults() {
        assert_eq!(presence_of("unlit"), Presence::Defaulted(DefaultValue::Bool(false)));
        assert_eq!(presence_of("frames"), Presence::Defaulted(DefaultValue::Int(1)));
        assert_eq!(
            presence_of("animationCycle"),
            Presence::Defaulted(DefaultValue::Float(1.0))
        );
        assert_eq!(
            presence_of("imagePosition"),
            Presence::Defaulted(DefaultValue::Vec2([0.0, 0.0]))
        );
        assert_eq!(presence_of("collision"), Presence::Defaulted(DefaultValue::CollisionNone));
        assert_eq!(
            presence_of("direction"),
            Presence::Defaulted(DefaultValue::DirectionByImages)
        );

        // No documented default: these stay absent after resolution.
        assert_eq!(presence_of("spaceScan"), Presence::Optional);
        assert_eq!(presence_of("lightPosition"), Presence::Optional);
    }
}
