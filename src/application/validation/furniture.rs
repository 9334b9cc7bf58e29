use chrono::{DateTime, Utc};

use super::{
    asset_reference, choice, full_dimensions, hex_color, in_range, path, point, positive,
    reject_empty_patch, text, Violations,
};
use crate::application::dto::{CreateFurnitureRequestDto, UpdateFurnitureRequestDto, Vector3Dto};
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::entities::Furniture;
use crate::domain::value_objects::{
    Dimensions, FurnitureMaterial, FurnitureType, RoomId, UserId, Vector3,
};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const CUSTOM_TYPE_MAX: usize = 50;
const MANUFACTURER_MAX: usize = 100;
const NOTES_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct NewFurniture {
    pub name: String,
    pub furniture_type: FurnitureType,
    pub custom_type: Option<String>,
    pub model: String,
    pub dimensions: Dimensions,
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
    pub color: Option<String>,
    pub material: Option<FurnitureMaterial>,
    pub price: Option<f64>,
    pub manufacturer: Option<String>,
    pub notes: String,
}

impl NewFurniture {
    pub fn into_furniture(self, room: RoomId, user: UserId, now: DateTime<Utc>) -> Furniture {
        let mut item = Furniture::new(
            room,
            self.name,
            self.furniture_type,
            self.model,
            self.dimensions,
            self.position,
            user,
            now,
        );
        item.custom_type = self.custom_type;
        item.rotation = self.rotation;
        item.scale = self.scale;
        item.color = self.color;
        item.material = self.material;
        item.price = self.price;
        item.manufacturer = self.manufacturer;
        item.notes = self.notes;
        item
    }
}

/// Per-axis overrides of a stored vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxesPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl AxesPatch {
    pub fn merge_onto(self, base: Vector3) -> Vector3 {
        Vector3::new(
            self.x.unwrap_or(base.x),
            self.y.unwrap_or(base.y),
            self.z.unwrap_or(base.z),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FurniturePatch {
    pub name: Option<String>,
    pub furniture_type: Option<FurnitureType>,
    pub custom_type: Option<String>,
    pub model: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub position: Option<Vector3>,
    pub rotation: Option<AxesPatch>,
    pub scale: Option<AxesPatch>,
    pub color: Option<String>,
    pub material: Option<FurnitureMaterial>,
    pub price: Option<f64>,
    pub manufacturer: Option<String>,
    pub notes: Option<String>,
    pub expected_version: Option<u32>,
}

impl FurniturePatch {
    pub fn apply(self, item: &mut Furniture) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(furniture_type) = self.furniture_type {
            item.furniture_type = furniture_type;
            if !furniture_type.is_custom() {
                item.custom_type = None;
            }
        }
        if let Some(custom_type) = self.custom_type {
            item.custom_type = Some(custom_type);
        }
        if let Some(model) = self.model {
            item.model = model;
        }
        if let Some(dimensions) = self.dimensions {
            item.dimensions = dimensions;
        }
        if let Some(position) = self.position {
            item.position = position;
        }
        if let Some(rotation) = self.rotation {
            item.rotation = rotation.merge_onto(item.rotation);
        }
        if let Some(scale) = self.scale {
            item.scale = scale.merge_onto(item.scale);
        }
        if let Some(color) = self.color {
            item.color = Some(color);
        }
        if let Some(material) = self.material {
            item.material = Some(material);
        }
        if let Some(price) = self.price {
            item.price = Some(price);
        }
        if let Some(manufacturer) = self.manufacturer {
            item.manufacturer = Some(manufacturer);
        }
        if let Some(notes) = self.notes {
            item.notes = notes;
        }
    }
}

pub fn validate_new_furniture(dto: &CreateFurnitureRequestDto) -> ServiceResult<NewFurniture> {
    let mut v = Violations::new();

    let name = text(&mut v, "name", dto.name.as_deref(), false, NAME_MIN, NAME_MAX);
    let furniture_type = choice(
        &mut v,
        "type",
        dto.furniture_type.as_deref(),
        true,
        FurnitureType::parse,
        FurnitureType::VALUES,
    );
    let custom_type = custom_type(&mut v, furniture_type, dto.custom_type.as_deref());
    let model = asset_reference(&mut v, "model", dto.model.as_deref(), true);
    let dimensions = full_dimensions(&mut v, "dimensions", dto.dimensions.as_ref());
    let position = point(&mut v, "position", dto.position.as_ref(), true);
    let rotation = rotation(&mut v, dto.rotation.as_ref());
    let scale = scale(&mut v, dto.scale.as_ref());
    let color = hex_color(&mut v, "color", dto.color.as_deref());
    let material = choice(
        &mut v,
        "material",
        dto.material.as_deref(),
        false,
        FurnitureMaterial::parse,
        FurnitureMaterial::VALUES,
    );
    let price = price(&mut v, dto.price);
    let manufacturer = text(
        &mut v,
        "manufacturer",
        dto.manufacturer.as_deref(),
        false,
        1,
        MANUFACTURER_MAX,
    );
    let notes = text(&mut v, "notes", dto.notes.as_deref(), false, 0, NOTES_MAX);

    v.finish(())?;
    let (Some(furniture_type), Some(model), Some(dimensions), Some(position)) =
        (furniture_type, model, dimensions, position)
    else {
        return Err(ServiceError::invalid("body", "incomplete furniture"));
    };

    let name = name.unwrap_or_else(|| {
        custom_type
            .clone()
            .unwrap_or_else(|| furniture_type.as_str().to_string())
    });

    Ok(NewFurniture {
        name,
        furniture_type,
        custom_type,
        model,
        dimensions,
        position,
        rotation: rotation.map_or(Vector3::ZERO, |r| r.merge_onto(Vector3::ZERO)),
        scale: scale.map_or(Vector3::ONE, |s| s.merge_onto(Vector3::ONE)),
        color,
        material,
        price,
        manufacturer,
        notes: notes.unwrap_or_default(),
    })
}

pub fn validate_furniture_patch(dto: &UpdateFurnitureRequestDto) -> ServiceResult<FurniturePatch> {
    let mut v = Violations::new();

    let is_empty = dto.name.is_none()
        && dto.furniture_type.is_none()
        && dto.custom_type.is_none()
        && dto.model.is_none()
        && dto.dimensions.is_none()
        && dto.position.is_none()
        && dto.rotation.is_none()
        && dto.scale.is_none()
        && dto.color.is_none()
        && dto.material.is_none()
        && dto.price.is_none()
        && dto.manufacturer.is_none()
        && dto.notes.is_none();
    reject_empty_patch(&mut v, is_empty);

    let furniture_type = choice(
        &mut v,
        "type",
        dto.furniture_type.as_deref(),
        false,
        FurnitureType::parse,
        FurnitureType::VALUES,
    );
    let custom_type = if dto.furniture_type.is_some() {
        custom_type(&mut v, furniture_type, dto.custom_type.as_deref())
    } else {
        text(
            &mut v,
            "customType",
            dto.custom_type.as_deref(),
            false,
            1,
            CUSTOM_TYPE_MAX,
        )
    };

    let patch = FurniturePatch {
        name: text(&mut v, "name", dto.name.as_deref(), false, NAME_MIN, NAME_MAX),
        furniture_type,
        custom_type,
        model: asset_reference(&mut v, "model", dto.model.as_deref(), false),
        dimensions: dto
            .dimensions
            .as_ref()
            .and_then(|d| full_dimensions(&mut v, "dimensions", Some(d))),
        position: point(&mut v, "position", dto.position.as_ref(), false),
        rotation: rotation(&mut v, dto.rotation.as_ref()),
        scale: scale(&mut v, dto.scale.as_ref()),
        color: hex_color(&mut v, "color", dto.color.as_deref()),
        material: choice(
            &mut v,
            "material",
            dto.material.as_deref(),
            false,
            FurnitureMaterial::parse,
            FurnitureMaterial::VALUES,
        ),
        price: price(&mut v, dto.price),
        manufacturer: text(
            &mut v,
            "manufacturer",
            dto.manufacturer.as_deref(),
            false,
            1,
            MANUFACTURER_MAX,
        ),
        notes: text(&mut v, "notes", dto.notes.as_deref(), false, 0, NOTES_MAX),
        expected_version: dto.version,
    };

    v.finish(patch)
}

pub fn check_furniture_type(item: &Furniture) -> ServiceResult<()> {
    if item.has_consistent_type() {
        Ok(())
    } else if item.furniture_type.is_custom() {
        Err(ServiceError::invalid(
            "customType",
            "is required when type is custom",
        ))
    } else {
        Err(ServiceError::invalid(
            "customType",
            "is only allowed when type is custom",
        ))
    }
}

fn custom_type(
    v: &mut Violations,
    furniture_type: Option<FurnitureType>,
    value: Option<&str>,
) -> Option<String> {
    match furniture_type {
        Some(t) if t.is_custom() => text(v, "customType", value, true, 1, CUSTOM_TYPE_MAX),
        Some(_) if value.is_some() => {
            v.push("customType", "is only allowed when type is custom");
            None
        }
        _ => None,
    }
}

/// Degrees per axis; absent axes keep their current value
fn rotation(v: &mut Violations, value: Option<&Vector3Dto>) -> Option<AxesPatch> {
    let r = value?;
    Some(AxesPatch {
        x: in_range(v, "rotation.x", r.x, false, 0.0, 360.0),
        y: in_range(v, "rotation.y", r.y, false, 0.0, 360.0),
        z: in_range(v, "rotation.z", r.z, false, 0.0, 360.0),
    })
}

/// Positive factor per axis; absent axes keep their current value
fn scale(v: &mut Violations, value: Option<&Vector3Dto>) -> Option<AxesPatch> {
    let s = value?;
    Some(AxesPatch {
        x: positive(v, &path("scale", "x"), s.x, false),
        y: positive(v, &path("scale", "y"), s.y, false),
        z: positive(v, &path("scale", "z"), s.z, false),
    })
}

fn price(v: &mut Violations, value: Option<f64>) -> Option<f64> {
    match value {
        Some(p) if p.is_finite() && p >= 0.0 => Some(p),
        Some(_) => {
            v.push("price", "must be zero or greater");
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::DimensionsDto;

    fn sofa() -> CreateFurnitureRequestDto {
        CreateFurnitureRequestDto {
            furniture_type: Some("sofa".to_string()),
            model: Some("64b7f0c2a1b2c3d4e5f60718".to_string()),
            dimensions: Some(DimensionsDto {
                width: Some(2.0),
                length: Some(1.0),
                height: Some(1.0),
            }),
            position: Some(Vector3Dto {
                x: Some(1.0),
                y: Some(0.0),
                z: Some(1.0),
            }),
            ..Default::default()
        }
    }

    fn fields(err: ServiceError) -> Vec<String> {
        match err {
            ServiceError::InvalidInput(violations) => {
                violations.into_iter().map(|f| f.field).collect()
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn unnamed_furniture_is_named_after_its_type() {
        let item = validate_new_furniture(&sofa()).expect("valid");
        assert_eq!(item.name, "sofa");
        assert_eq!(item.rotation, Vector3::ZERO);
        assert_eq!(item.scale, Vector3::ONE);
    }

    #[test]
    fn negative_position_is_allowed() {
        let mut dto = sofa();
        dto.position = Some(Vector3Dto {
            x: Some(-4.0),
            y: Some(0.0),
            z: Some(-0.5),
        });
        let item = validate_new_furniture(&dto).expect("valid");
        assert_eq!(item.position, Vector3::new(-4.0, 0.0, -0.5));
    }

    #[test]
    fn transform_ranges_are_enforced() {
        let mut dto = sofa();
        dto.rotation = Some(Vector3Dto {
            x: Some(361.0),
            y: None,
            z: Some(-1.0),
        });
        dto.scale = Some(Vector3Dto {
            x: Some(0.0),
            y: Some(1.0),
            z: Some(1.0),
        });
        dto.price = Some(-10.0);
        assert_eq!(
            fields(validate_new_furniture(&dto).unwrap_err()),
            vec!["rotation.x", "rotation.z", "scale.x", "price"]
        );
    }

    #[test]
    fn zero_price_and_partial_rotation_are_accepted() {
        let mut dto = sofa();
        dto.price = Some(0.0);
        dto.rotation = Some(Vector3Dto {
            x: None,
            y: Some(90.0),
            z: None,
        });
        let item = validate_new_furniture(&dto).expect("valid");
        assert_eq!(item.price, Some(0.0));
        assert_eq!(item.rotation, Vector3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn model_must_be_an_asset_identifier() {
        let mut dto = sofa();
        dto.model = Some("sofa.glb".to_string());
        assert_eq!(fields(validate_new_furniture(&dto).unwrap_err()), vec!["model"]);
    }

    #[test]
    fn custom_furniture_needs_a_label() {
        let mut dto = sofa();
        dto.furniture_type = Some("custom".to_string());
        assert_eq!(fields(validate_new_furniture(&dto).unwrap_err()), vec!["customType"]);

        dto.custom_type = Some("hammock".to_string());
        let item = validate_new_furniture(&dto).expect("valid");
        assert_eq!(item.name, "hammock");
    }

    #[test]
    fn partial_transform_patch_keeps_other_axes() {
        let mut item = validate_new_furniture(&sofa())
            .expect("valid")
            .into_furniture(RoomId::new(), UserId::new(), Utc::now());
        item.rotation = Vector3::new(45.0, 10.0, 30.0);
        item.scale = Vector3::new(2.0, 2.0, 2.0);

        let patch = validate_furniture_patch(&UpdateFurnitureRequestDto {
            rotation: Some(Vector3Dto {
                x: None,
                y: Some(90.0),
                z: None,
            }),
            scale: Some(Vector3Dto {
                x: Some(3.0),
                y: None,
                z: None,
            }),
            ..Default::default()
        })
        .expect("valid");
        patch.apply(&mut item);

        assert_eq!(item.rotation, Vector3::new(45.0, 90.0, 30.0));
        assert_eq!(item.scale, Vector3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn furniture_patch_needs_a_change() {
        assert_eq!(
            fields(validate_furniture_patch(&UpdateFurnitureRequestDto::default()).unwrap_err()),
            vec!["body"]
        );
    }
}
