//! Typed model of one object orientation (sprite variant).
//!
//! An orientation document is a loosely-typed JSON object that omits most
//! fields most of the time. Loading keeps every optional field tri-state
//! (see [`Field`]) so that saving an untouched instance reproduces the
//! original key set; [`ObjectOrientation::resolve_defaults`] fills in the
//! documented defaults for rendering without polluting the saved file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::AssetError;
use crate::field::Field;
use crate::frames::FrameSet;
use crate::geom::{JsonNumber, Vec2F, Vec2I};
use crate::schema::{self, keys, DefaultValue, Presence};

/// Sprite facing for direction-sensitive objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Faces left; uses the left frame set when one is resolved.
    Left,
    /// Faces right; the fallback for all frame selection.
    Right,
}

impl Direction {
    /// Document tag for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the object participates in tile collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collision {
    /// No collision; the object is decoration.
    #[default]
    None,
    /// Fully solid block.
    Solid,
    /// One-way platform.
    Platform,
}

impl Collision {
    /// Document tag for this collision kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Collision::None => "none",
            Collision::Solid => "solid",
            Collision::Platform => "platform",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "none" => Some(Collision::None),
            "solid" => Some(Collision::Solid),
            "platform" => Some(Collision::Platform),
            _ => None,
        }
    }
}

/// Terrain side the object may attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Wall to the left.
    Left,
    /// Floor below.
    Bottom,
    /// Wall to the right.
    Right,
    /// Ceiling above.
    Top,
    /// Background wall behind the object.
    Background,
}

impl Anchor {
    /// Document tag for this anchor side.
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Left => "left",
            Anchor::Bottom => "bottom",
            Anchor::Right => "right",
            Anchor::Top => "top",
            Anchor::Background => "background",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "left" => Some(Anchor::Left),
            "bottom" => Some(Anchor::Bottom),
            "right" => Some(Anchor::Right),
            "top" => Some(Anchor::Top),
            "background" => Some(Anchor::Background),
            _ => None,
        }
    }
}

/// `dualImage` appears in the corpus as either a shared image template or
/// a bare boolean marker next to `leftImage`/`rightImage`.
#[derive(Debug, Clone, PartialEq)]
pub enum DualImage {
    /// Shared image template covering both directions.
    Template(String),
    /// Marker form; the directional images carry the actual names.
    Marker(bool),
}

/// Which of the three image forms an orientation uses.
///
/// A loaded document populates at most one; a freshly-built instance may
/// populate none until the editor assigns an image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageForm<'a> {
    /// Single `image` reference.
    Single(&'a str),
    /// Direction-sensitive pair (`dualImage`, `leftImage`, `rightImage`).
    Dual {
        /// The `dualImage` template or marker, when present.
        dual: Option<&'a DualImage>,
        /// The `leftImage` name, when present.
        left: Option<&'a str>,
        /// The `rightImage` name, when present.
        right: Option<&'a str>,
    },
    /// Ordered `imageLayers` stack.
    Layers(&'a [ImageLayer]),
}

/// One entry of an `imageLayers` stack, ordered back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayer {
    /// Image name of this layer.
    pub image: String,
    /// Per-layer unlit override.
    pub unlit: Field<bool>,
}

impl ImageLayer {
    fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let image = obj.get(keys::IMAGE)?.as_str()?.to_owned();
        let unlit = match obj.get(keys::UNLIT) {
            None => Field::Absent,
            Some(v) => Field::Explicit(v.as_bool()?),
        };
        Some(ImageLayer { image, unlit })
    }

    fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(keys::IMAGE.to_owned(), Value::String(self.image.clone()));
        if let Some(unlit) = self.unlit.explicit() {
            obj.insert(keys::UNLIT.to_owned(), Value::Bool(*unlit));
        }
        Value::Object(obj)
    }
}

/// One visual variant of a placeable object.
///
/// Constructed from a JSON document by [`ObjectOrientation::from_document`],
/// mutated in place by the editor, and serialized back by
/// [`ObjectOrientation::to_document`]. Frame data is installed separately by
/// [`ObjectOrientation::resolve_frames`] and never touches the document.
#[derive(Debug, Clone, Default)]
pub struct ObjectOrientation {
    /// Single image name (`image`).
    pub image: Field<String>,
    /// Dual-image template or marker (`dualImage`).
    pub dual_image: Field<DualImage>,
    /// Left-facing image name (`leftImage`); meaningful alongside `dualImage`.
    pub left_image: Field<String>,
    /// Right-facing image name (`rightImage`); meaningful alongside `dualImage`.
    pub right_image: Field<String>,
    /// Ordered image layer stack (`imageLayers`).
    pub image_layers: Field<Vec<ImageLayer>>,
    /// Render without lighting (`unlit`, default false).
    pub unlit: Field<bool>,
    /// Mirror images horizontally (`flipImages`, default false).
    pub flip_images: Field<bool>,
    /// Sprite offset in asset pixels (`imagePosition`, default (0, 0)).
    pub image_position: Field<Vec2F>,
    /// Animation frame count (`frames`, default 1).
    pub frames: Field<u32>,
    /// Animation cycle duration in seconds (`animationCycle`, default 1.0).
    pub animation_cycle: Field<JsonNumber>,
    /// Tile cells the object occupies (`spaces`).
    pub spaces: Field<Vec<Vec2I>>,
    /// Vertical scan distance for space detection (`spaceScan`, no default).
    pub space_scan: Field<JsonNumber>,
    /// Anchor tiles must be tilled soil (`requireTilledAnchors`, default false).
    pub require_tilled_anchors: Field<bool>,
    /// Anchor tiles must be soil (`requireSoilAnchors`, default false).
    pub require_soil_anchors: Field<bool>,
    /// Sides the object anchors against (`anchors`).
    pub anchors: Field<Vec<Anchor>>,
    /// Background anchor tile coordinates (`bgAnchors`).
    pub bg_anchors: Field<Vec<Vec2I>>,
    /// Foreground anchor tile coordinates (`fgAnchors`).
    pub fg_anchors: Field<Vec<Vec2I>>,
    /// Facing (`direction`; defaults to right for dual-image objects,
    /// left otherwise).
    pub direction: Field<Direction>,
    /// Collision kind (`collision`, default none).
    pub collision: Field<Collision>,
    /// Light source offset (`lightPosition`, no default).
    pub light_position: Field<Vec2F>,
    /// Point light angle in degrees (`pointAngle`, default 0.0).
    pub point_angle: Field<JsonNumber>,

    /// Resolved left-facing frame data. Never serialized.
    pub left_frames: Option<FrameSet>,
    /// Resolved right-facing frame data. Never serialized.
    pub right_frames: Option<FrameSet>,
}

fn malformed(key: &'static str) -> AssetError {
    AssetError::Malformed {
        field: key,
        expected: schema::expected_for(key),
    }
}

fn take_string(
    doc: &Map<String, Value>,
    key: &'static str,
) -> Result<Field<String>, AssetError> {
    match doc.get(key) {
        None => Ok(Field::Absent),
        Some(v) => v
            .as_str()
            .map(|s| Field::Explicit(s.to_owned()))
            .ok_or_else(|| malformed(key)),
    }
}

fn take_bool(doc: &Map<String, Value>, key: &'static str) -> Result<Field<bool>, AssetError> {
    match doc.get(key) {
        None => Ok(Field::Absent),
        Some(v) => v
            .as_bool()
            .map(Field::Explicit)
            .ok_or_else(|| malformed(key)),
    }
}

fn take_number(
    doc: &Map<String, Value>,
    key: &'static str,
) -> Result<Field<JsonNumber>, AssetError> {
    match doc.get(key) {
        None => Ok(Field::Absent),
        Some(v) => JsonNumber::from_json(v)
            .map(Field::Explicit)
            .ok_or_else(|| malformed(key)),
    }
}

fn take_frame_count(
    doc: &Map<String, Value>,
    key: &'static str,
) -> Result<Field<u32>, AssetError> {
    match doc.get(key) {
        None => Ok(Field::Absent),
        Some(v) => v
            .as_u64()
            .filter(|n| *n >= 1)
            .and_then(|n| u32::try_from(n).ok())
            .map(Field::Explicit)
            .ok_or_else(|| malformed(key)),
    }
}

fn take_vec2f(doc: &Map<String, Value>, key: &'static str) -> Result<Field<Vec2F>, AssetError> {
    match doc.get(key) {
        None => Ok(Field::Absent),
        Some(v) => Vec2F::from_json(v)
            .map(Field::Explicit)
            .ok_or_else(|| malformed(key)),
    }
}

fn take_point_list(
    doc: &Map<String, Value>,
    key: &'static str,
) -> Result<Field<Vec<Vec2I>>, AssetError> {
    let Some(value) = doc.get(key) else {
        return Ok(Field::Absent);
    };
    let arr = value.as_array().ok_or_else(|| malformed(key))?;
    let points = arr
        .iter()
        .map(|v| Vec2I::from_json(v).ok_or_else(|| malformed(key)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Field::Explicit(points))
}

fn take_anchors(
    doc: &Map<String, Value>,
    key: &'static str,
) -> Result<Field<Vec<Anchor>>, AssetError> {
    let Some(value) = doc.get(key) else {
        return Ok(Field::Absent);
    };
    let arr = value.as_array().ok_or_else(|| malformed(key))?;
    let tags = arr
        .iter()
        .map(|v| {
            v.as_str()
                .and_then(Anchor::from_tag)
                .ok_or_else(|| malformed(key))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Field::Explicit(tags))
}

fn take_dual_image(doc: &Map<String, Value>) -> Result<Field<DualImage>, AssetError> {
    match doc.get(keys::DUAL_IMAGE) {
        None => Ok(Field::Absent),
        Some(Value::String(s)) => Ok(Field::Explicit(DualImage::Template(s.clone()))),
        Some(Value::Bool(b)) => Ok(Field::Explicit(DualImage::Marker(*b))),
        Some(_) => Err(malformed(keys::DUAL_IMAGE)),
    }
}

fn take_image_layers(doc: &Map<String, Value>) -> Result<Field<Vec<ImageLayer>>, AssetError> {
    let Some(value) = doc.get(keys::IMAGE_LAYERS) else {
        return Ok(Field::Absent);
    };
    let arr = value
        .as_array()
        .ok_or_else(|| malformed(keys::IMAGE_LAYERS))?;
    let layers = arr
        .iter()
        .map(|v| ImageLayer::from_json(v).ok_or_else(|| malformed(keys::IMAGE_LAYERS)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Field::Explicit(layers))
}

fn take_direction(doc: &Map<String, Value>) -> Result<Field<Direction>, AssetError> {
    match doc.get(keys::DIRECTION) {
        None => Ok(Field::Absent),
        Some(v) => v
            .as_str()
            .and_then(Direction::from_tag)
            .map(Field::Explicit)
            .ok_or_else(|| malformed(keys::DIRECTION)),
    }
}

fn take_collision(doc: &Map<String, Value>) -> Result<Field<Collision>, AssetError> {
    match doc.get(keys::COLLISION) {
        None => Ok(Field::Absent),
        Some(v) => v
            .as_str()
            .and_then(Collision::from_tag)
            .map(Field::Explicit)
            .ok_or_else(|| malformed(keys::COLLISION)),
    }
}

// A document may populate at most one image form; `dualImage`,
// `leftImage` and `rightImage` count as one family.
fn check_image_forms(doc: &Map<String, Value>) -> Result<(), AssetError> {
    let single = doc.contains_key(keys::IMAGE).then_some(keys::IMAGE);
    let dual = [keys::DUAL_IMAGE, keys::LEFT_IMAGE, keys::RIGHT_IMAGE]
        .into_iter()
        .find(|k| doc.contains_key(*k));
    let layers = doc
        .contains_key(keys::IMAGE_LAYERS)
        .then_some(keys::IMAGE_LAYERS);

    let mut present = [single, dual, layers].into_iter().flatten();
    if let (Some(first), Some(second)) = (present.next(), present.next()) {
        return Err(AssetError::ConflictingImageForms { first, second });
    }
    Ok(())
}

fn put(doc: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        doc.insert(key.to_owned(), v);
    }
}

impl ObjectOrientation {
    /// Parse one orientation from a JSON document.
    ///
    /// Unknown keys are ignored. A recognized key holding a value of the
    /// wrong shape, or a document populating more than one image form,
    /// fails the whole load; no partial instance escapes.
    pub fn from_document(doc: &Value) -> Result<Self, AssetError> {
        let obj = doc.as_object().ok_or(AssetError::NotAnObject)?;
        check_image_forms(obj)?;

        Ok(ObjectOrientation {
            image: take_string(obj, keys::IMAGE)?,
            dual_image: take_dual_image(obj)?,
            left_image: take_string(obj, keys::LEFT_IMAGE)?,
            right_image: take_string(obj, keys::RIGHT_IMAGE)?,
            image_layers: take_image_layers(obj)?,
            unlit: take_bool(obj, keys::UNLIT)?,
            flip_images: take_bool(obj, keys::FLIP_IMAGES)?,
            image_position: take_vec2f(obj, keys::IMAGE_POSITION)?,
            frames: take_frame_count(obj, keys::FRAMES)?,
            animation_cycle: take_number(obj, keys::ANIMATION_CYCLE)?,
            spaces: take_point_list(obj, keys::SPACES)?,
            space_scan: take_number(obj, keys::SPACE_SCAN)?,
            require_tilled_anchors: take_bool(obj, keys::REQUIRE_TILLED_ANCHORS)?,
            require_soil_anchors: take_bool(obj, keys::REQUIRE_SOIL_ANCHORS)?,
            anchors: take_anchors(obj, keys::ANCHORS)?,
            bg_anchors: take_point_list(obj, keys::BG_ANCHORS)?,
            fg_anchors: take_point_list(obj, keys::FG_ANCHORS)?,
            direction: take_direction(obj)?,
            collision: take_collision(obj)?,
            light_position: take_vec2f(obj, keys::LIGHT_POSITION)?,
            point_angle: take_number(obj, keys::POINT_ANGLE)?,
            left_frames: None,
            right_frames: None,
        })
    }

    /// Parse one orientation from JSON text.
    pub fn load_from_str(json: &str) -> Result<Self, AssetError> {
        let doc: Value = serde_json::from_str(json)?;
        Self::from_document(&doc)
    }

    /// Parse one orientation from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: Value = serde_json::from_str(&txt).map_err(|source| AssetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_document(&doc)
    }

    /// True when the object is direction-sensitive, i.e. carries a dual
    /// image or a left/right image pair.
    pub fn is_direction_sensitive(&self) -> bool {
        match self.dual_image.get() {
            Some(DualImage::Marker(enabled)) => *enabled,
            Some(DualImage::Template(_)) => true,
            None => !self.left_image.is_absent() && !self.right_image.is_absent(),
        }
    }

    /// The image form this orientation populates, if any. Loading
    /// guarantees at most one; `None` means no image has been assigned
    /// yet.
    pub fn image_form(&self) -> Option<ImageForm<'_>> {
        if let Some(name) = self.image.get() {
            return Some(ImageForm::Single(name));
        }
        if let Some(layers) = self.image_layers.get() {
            return Some(ImageForm::Layers(layers));
        }
        let dual = self.dual_image.get();
        let left = self.left_image.get().map(String::as_str);
        let right = self.right_image.get().map(String::as_str);
        if dual.is_some() || left.is_some() || right.is_some() {
            return Some(ImageForm::Dual { dual, left, right });
        }
        None
    }

    /// Fill every field the schema table marks as defaulted and is still
    /// absent. Idempotent; never fails.
    ///
    /// `spaceScan` and `lightPosition` have no documented default and are
    /// left absent.
    pub fn resolve_defaults(&mut self) {
        for spec in schema::FIELDS {
            if let Presence::Defaulted(default) = spec.presence {
                self.apply_default(spec.key, default);
            }
        }
    }

    fn apply_default(&mut self, key: &str, default: DefaultValue) {
        match (key, default) {
            (keys::UNLIT, DefaultValue::Bool(b)) => self.unlit.or_default(b),
            (keys::FLIP_IMAGES, DefaultValue::Bool(b)) => self.flip_images.or_default(b),
            (keys::IMAGE_POSITION, DefaultValue::Vec2([x, y])) => {
                self.image_position.or_default(Vec2F::new(x, y))
            }
            (keys::FRAMES, DefaultValue::Int(n)) => self.frames.or_default(n),
            (keys::ANIMATION_CYCLE, DefaultValue::Float(v)) => {
                self.animation_cycle.or_default(JsonNumber::new(v))
            }
            (keys::REQUIRE_TILLED_ANCHORS, DefaultValue::Bool(b)) => {
                self.require_tilled_anchors.or_default(b)
            }
            (keys::REQUIRE_SOIL_ANCHORS, DefaultValue::Bool(b)) => {
                self.require_soil_anchors.or_default(b)
            }
            (keys::DIRECTION, DefaultValue::DirectionByImages) => {
                let facing = if self.is_direction_sensitive() {
                    Direction::Right
                } else {
                    Direction::Left
                };
                self.direction.or_default(facing);
            }
            (keys::COLLISION, DefaultValue::CollisionNone) => {
                self.collision.or_default(Collision::None)
            }
            (keys::POINT_ANGLE, DefaultValue::Float(v)) => {
                self.point_angle.or_default(JsonNumber::new(v))
            }
            // A table row this model has no field for.
            _ => {}
        }
    }

    /// Install collaborator-supplied frame data for one direction.
    pub fn resolve_frames(&mut self, direction: Direction, frames: FrameSet) {
        match direction {
            Direction::Left => self.left_frames = Some(frames),
            Direction::Right => self.right_frames = Some(frames),
        }
    }

    /// Serialize back to a JSON document.
    ///
    /// Only explicit fields are written; absent fields and resolved
    /// defaults are omitted, so load-then-save reproduces the original
    /// key set. Pure function of the current field values.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();

        put(&mut doc, keys::IMAGE, self.image.explicit().map(|s| Value::String(s.clone())));
        put(
            &mut doc,
            keys::DUAL_IMAGE,
            self.dual_image.explicit().map(|d| match d {
                DualImage::Template(s) => Value::String(s.clone()),
                DualImage::Marker(b) => Value::Bool(*b),
            }),
        );
        put(
            &mut doc,
            keys::LEFT_IMAGE,
            self.left_image.explicit().map(|s| Value::String(s.clone())),
        );
        put(
            &mut doc,
            keys::RIGHT_IMAGE,
            self.right_image.explicit().map(|s| Value::String(s.clone())),
        );
        put(
            &mut doc,
            keys::IMAGE_LAYERS,
            self.image_layers
                .explicit()
                .map(|layers| Value::Array(layers.iter().map(ImageLayer::to_json).collect())),
        );
        put(&mut doc, keys::UNLIT, self.unlit.explicit().map(|b| Value::Bool(*b)));
        put(
            &mut doc,
            keys::FLIP_IMAGES,
            self.flip_images.explicit().map(|b| Value::Bool(*b)),
        );
        put(
            &mut doc,
            keys::IMAGE_POSITION,
            self.image_position.explicit().map(|v| v.to_json()),
        );
        put(&mut doc, keys::FRAMES, self.frames.explicit().map(|n| Value::from(*n)));
        put(
            &mut doc,
            keys::ANIMATION_CYCLE,
            self.animation_cycle.explicit().map(|n| n.to_json()),
        );
        put(
            &mut doc,
            keys::SPACES,
            self.spaces
                .explicit()
                .map(|pts| Value::Array(pts.iter().map(|p| p.to_json()).collect())),
        );
        put(
            &mut doc,
            keys::SPACE_SCAN,
            self.space_scan.explicit().map(|n| n.to_json()),
        );
        put(
            &mut doc,
            keys::REQUIRE_TILLED_ANCHORS,
            self.require_tilled_anchors.explicit().map(|b| Value::Bool(*b)),
        );
        put(
            &mut doc,
            keys::REQUIRE_SOIL_ANCHORS,
            self.require_soil_anchors.explicit().map(|b| Value::Bool(*b)),
        );
        put(
            &mut doc,
            keys::ANCHORS,
            self.anchors.explicit().map(|tags| {
                Value::Array(tags.iter().map(|a| Value::String(a.as_str().to_owned())).collect())
            }),
        );
        put(
            &mut doc,
            keys::BG_ANCHORS,
            self.bg_anchors
                .explicit()
                .map(|pts| Value::Array(pts.iter().map(|p| p.to_json()).collect())),
        );
        put(
            &mut doc,
            keys::FG_ANCHORS,
            self.fg_anchors
                .explicit()
                .map(|pts| Value::Array(pts.iter().map(|p| p.to_json()).collect())),
        );
        put(
            &mut doc,
            keys::DIRECTION,
            self.direction.explicit().map(|d| Value::String(d.as_str().to_owned())),
        );
        put(
            &mut doc,
            keys::COLLISION,
            self.collision.explicit().map(|c| Value::String(c.as_str().to_owned())),
        );
        put(
            &mut doc,
            keys::LIGHT_POSITION,
            self.light_position.explicit().map(|v| v.to_json()),
        );
        put(
            &mut doc,
            keys::POINT_ANGLE,
            self.point_angle.explicit().map(|n| n.to_json()),
        );

        Value::Object(doc)
    }

    /// Serialize to pretty-printed JSON text.
    pub fn save_to_string(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Serialize to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        let txt = self.save_to_string()?;
        fs::write(path, txt).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
