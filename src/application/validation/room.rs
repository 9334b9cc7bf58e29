use chrono::{DateTime, Utc};

use super::{
    choice, finite, hex_color, in_range, path, point, positive, reject_empty_patch, text,
    Violations,
};
use crate::application::dto::{
    CeilingDto, CreateRoomRequestDto, DimensionsDto, FloorDto, FloorPointDto,
    UpdateRoomRequestDto, WallDto,
};
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::entities::{
    CeilingFinish, FloorFinish, Room, Wall, WallDoor, WallWindow, DEFAULT_WALL_COLOR,
};
use crate::domain::value_objects::{
    FloorMaterial, FloorPoint, OpenDirection, ProjectId, RoomDimensions, RoomType, UserId,
    Vector3,
};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const CUSTOM_TYPE_MAX: usize = 50;
const NOTES_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub name: String,
    pub room_type: RoomType,
    pub custom_type: Option<String>,
    pub dimensions: RoomDimensions,
    pub position: Vector3,
    pub walls: Vec<Wall>,
    pub wall_color: String,
    pub floor: FloorFinish,
    pub ceiling: CeilingFinish,
    pub notes: String,
}

impl NewRoom {
    pub fn into_room(self, project: ProjectId, user: UserId, now: DateTime<Utc>) -> Room {
        let mut room = Room::new(
            project,
            self.name,
            self.room_type,
            self.position,
            self.dimensions,
            user,
            now,
        );
        room.custom_type = self.custom_type;
        room.walls = self.walls;
        room.wall_color = self.wall_color;
        room.floor = self.floor;
        room.ceiling = self.ceiling;
        room.notes = self.notes;
        room
    }
}

/// A validated partial room update
///
/// Nested objects are replaced whole. Setting a non-custom type clears any
/// stored custom type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub room_type: Option<RoomType>,
    pub custom_type: Option<String>,
    pub dimensions: Option<RoomDimensions>,
    pub position: Option<Vector3>,
    pub walls: Option<Vec<Wall>>,
    pub wall_color: Option<String>,
    pub floor: Option<FloorFinish>,
    pub ceiling: Option<CeilingFinish>,
    pub notes: Option<String>,
    pub expected_version: Option<u32>,
}

impl RoomPatch {
    pub fn apply(self, room: &mut Room) {
        if let Some(name) = self.name {
            room.name = name;
        }
        if let Some(room_type) = self.room_type {
            room.room_type = room_type;
            if !room_type.is_custom() {
                room.custom_type = None;
            }
        }
        if let Some(custom_type) = self.custom_type {
            room.custom_type = Some(custom_type);
        }
        if let Some(dimensions) = self.dimensions {
            room.dimensions = dimensions;
        }
        if let Some(position) = self.position {
            room.position = position;
        }
        if let Some(walls) = self.walls {
            room.walls = walls;
        }
        if let Some(wall_color) = self.wall_color {
            room.wall_color = wall_color;
        }
        if let Some(floor) = self.floor {
            room.floor = floor;
        }
        if let Some(ceiling) = self.ceiling {
            room.ceiling = ceiling;
        }
        if let Some(notes) = self.notes {
            room.notes = notes;
        }
    }
}

pub fn validate_new_room(dto: &CreateRoomRequestDto) -> ServiceResult<NewRoom> {
    let mut v = Violations::new();

    let name = text(&mut v, "name", dto.name.as_deref(), true, NAME_MIN, NAME_MAX);
    let room_type = choice(
        &mut v,
        "type",
        dto.room_type.as_deref(),
        true,
        RoomType::parse,
        RoomType::VALUES,
    );
    let custom_type = custom_type(&mut v, room_type, dto.custom_type.as_deref());
    let dimensions = room_dimensions(&mut v, dto.dimensions.as_ref());
    let position = point(&mut v, "position", dto.position.as_ref(), true);
    let walls = dto.walls.as_deref().map(|w| walls(&mut v, w));
    let wall_color = hex_color(&mut v, "wallColor", dto.wall_color.as_deref());
    let floor = dto.floor.as_ref().map(|f| floor(&mut v, f));
    let ceiling = dto.ceiling.as_ref().map(|c| ceiling(&mut v, c));
    let notes = text(&mut v, "notes", dto.notes.as_deref(), false, 0, NOTES_MAX);

    v.finish(())?;
    let (Some(name), Some(room_type), Some(dimensions), Some(position)) =
        (name, room_type, dimensions, position)
    else {
        return Err(ServiceError::invalid("body", "incomplete room"));
    };

    Ok(NewRoom {
        name,
        room_type,
        custom_type,
        dimensions,
        position,
        walls: walls.unwrap_or_default(),
        wall_color: wall_color.unwrap_or_else(|| DEFAULT_WALL_COLOR.to_string()),
        floor: floor.unwrap_or_default(),
        ceiling: ceiling.unwrap_or_default(),
        notes: notes.unwrap_or_default(),
    })
}

pub fn validate_room_patch(dto: &UpdateRoomRequestDto) -> ServiceResult<RoomPatch> {
    let mut v = Violations::new();

    let is_empty = dto.name.is_none()
        && dto.room_type.is_none()
        && dto.custom_type.is_none()
        && dto.dimensions.is_none()
        && dto.position.is_none()
        && dto.walls.is_none()
        && dto.wall_color.is_none()
        && dto.floor.is_none()
        && dto.ceiling.is_none()
        && dto.notes.is_none();
    reject_empty_patch(&mut v, is_empty);

    let room_type = choice(
        &mut v,
        "type",
        dto.room_type.as_deref(),
        false,
        RoomType::parse,
        RoomType::VALUES,
    );
    // Without a type in the patch the stored type decides; the service
    // re-checks the merged room.
    let custom_type = if dto.room_type.is_some() {
        custom_type(&mut v, room_type, dto.custom_type.as_deref())
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

    let patch = RoomPatch {
        name: text(&mut v, "name", dto.name.as_deref(), false, NAME_MIN, NAME_MAX),
        room_type,
        custom_type,
        dimensions: dto
            .dimensions
            .as_ref()
            .and_then(|d| room_dimensions(&mut v, Some(d))),
        position: point(&mut v, "position", dto.position.as_ref(), false),
        walls: dto.walls.as_deref().map(|w| walls(&mut v, w)),
        wall_color: hex_color(&mut v, "wallColor", dto.wall_color.as_deref()),
        floor: dto.floor.as_ref().map(|f| floor(&mut v, f)),
        ceiling: dto.ceiling.as_ref().map(|c| ceiling(&mut v, c)),
        notes: text(&mut v, "notes", dto.notes.as_deref(), false, 0, NOTES_MAX),
        expected_version: dto.version,
    };

    v.finish(patch)
}

/// Check that a merged room still pairs `customType` with the custom type
pub fn check_room_type(room: &Room) -> ServiceResult<()> {
    if room.has_consistent_type() {
        Ok(())
    } else if room.room_type.is_custom() {
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
    room_type: Option<RoomType>,
    value: Option<&str>,
) -> Option<String> {
    match room_type {
        Some(t) if t.is_custom() => text(v, "customType", value, true, 1, CUSTOM_TYPE_MAX),
        Some(_) if value.is_some() => {
            v.push("customType", "is only allowed when type is custom");
            None
        }
        _ => None,
    }
}

fn room_dimensions(v: &mut Violations, value: Option<&DimensionsDto>) -> Option<RoomDimensions> {
    let Some(dims) = value else {
        v.push("dimensions", "is required");
        return None;
    };
    let width = positive(v, "dimensions.width", dims.width, true);
    let length = positive(v, "dimensions.length", dims.length, true);
    let height = positive(v, "dimensions.height", dims.height, false);
    if dims.height.is_some() && height.is_none() {
        return None;
    }
    Some(RoomDimensions::new(width?, length?, height))
}

fn walls(v: &mut Violations, items: &[WallDto]) -> Vec<Wall> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, wall)| self::wall(v, &format!("walls.{i}"), wall))
        .collect()
}

fn wall(v: &mut Violations, base: &str, dto: &WallDto) -> Option<Wall> {
    let start = floor_point(v, &path(base, "start"), dto.start.as_ref());
    let end = floor_point(v, &path(base, "end"), dto.end.as_ref());

    let mut windows = Vec::new();
    for (i, w) in dto.windows.iter().flatten().enumerate() {
        let field = format!("{base}.windows.{i}");
        let position = in_range(v, &path(&field, "position"), w.position, true, 0.0, 1.0);
        let width = positive(v, &path(&field, "width"), w.width, true);
        let height = positive(v, &path(&field, "height"), w.height, true);
        let elevation = match w.elevation {
            None => Some(0.0),
            Some(e) if e.is_finite() && e >= 0.0 => Some(e),
            Some(_) => {
                v.push(path(&field, "elevation"), "must be zero or greater");
                None
            }
        };
        if let (Some(position), Some(width), Some(height), Some(elevation)) =
            (position, width, height, elevation)
        {
            windows.push(WallWindow {
                position,
                width,
                height,
                elevation,
            });
        }
    }

    let mut doors = Vec::new();
    for (i, d) in dto.doors.iter().flatten().enumerate() {
        let field = format!("{base}.doors.{i}");
        let position = in_range(v, &path(&field, "position"), d.position, true, 0.0, 1.0);
        let width = positive(v, &path(&field, "width"), d.width, true);
        let height = positive(v, &path(&field, "height"), d.height, true);
        let open_direction = choice(
            v,
            &path(&field, "openDirection"),
            d.open_direction.as_deref(),
            false,
            OpenDirection::parse,
            OpenDirection::VALUES,
        );
        if d.open_direction.is_some() && open_direction.is_none() {
            continue;
        }
        if let (Some(position), Some(width), Some(height)) = (position, width, height) {
            doors.push(WallDoor {
                position,
                width,
                height,
                is_open: d.is_open.unwrap_or(false),
                open_direction: open_direction.unwrap_or_default(),
            });
        }
    }

    let color = hex_color(v, &path(base, "color"), dto.color.as_deref());
    if dto.color.is_some() && color.is_none() {
        return None;
    }

    Some(Wall {
        start: start?,
        end: end?,
        windows,
        doors,
        color: color.unwrap_or_else(|| DEFAULT_WALL_COLOR.to_string()),
        texture: dto.texture.clone().unwrap_or_default(),
    })
}

fn floor_point(
    v: &mut Violations,
    field: &str,
    value: Option<&FloorPointDto>,
) -> Option<FloorPoint> {
    let Some(p) = value else {
        v.push(field, "is required");
        return None;
    };
    let x = finite(v, &path(field, "x"), p.x, true);
    let z = finite(v, &path(field, "z"), p.z, true);
    Some(FloorPoint { x: x?, z: z? })
}

fn floor(v: &mut Violations, dto: &FloorDto) -> FloorFinish {
    let defaults = FloorFinish::default();
    FloorFinish {
        material: choice(
            v,
            "floor.material",
            dto.material.as_deref(),
            false,
            FloorMaterial::parse,
            FloorMaterial::VALUES,
        )
        .unwrap_or(defaults.material),
        color: hex_color(v, "floor.color", dto.color.as_deref()).unwrap_or(defaults.color),
        texture: dto.texture.clone().unwrap_or_default(),
    }
}

fn ceiling(v: &mut Violations, dto: &CeilingDto) -> CeilingFinish {
    let defaults = CeilingFinish::default();
    CeilingFinish {
        height: positive(v, "ceiling.height", dto.height, false).unwrap_or(defaults.height),
        color: hex_color(v, "ceiling.color", dto.color.as_deref()).unwrap_or(defaults.color),
        texture: dto.texture.clone().unwrap_or_default(),
    }
}
