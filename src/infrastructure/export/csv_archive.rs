//! Zipped CSV export: one file each for the project, its rooms and furniture

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::aggregates::ProjectAggregate;

const PROJECT_HEADERS: [&str; 6] = ["ID", "Name", "Description", "Dimensions", "Styles", "Created At"];
const ROOM_HEADERS: [&str; 5] = ["ID", "Name", "Type", "Dimensions", "Project ID"];
const FURNITURE_HEADERS: [&str; 7] = [
    "ID",
    "Name",
    "Type",
    "Dimensions",
    "Position",
    "Rotation",
    "Room ID",
];

const ARCHIVE_ENTRIES: [&str; 3] = ["project.csv", "rooms.csv", "furniture.csv"];

fn json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to encode CSV cell")
}

fn write_csv(path: &Path, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn project_rows(aggregate: &ProjectAggregate) -> Result<Vec<Vec<String>>> {
    let project = aggregate.project();
    Ok(vec![vec![
        project.id.to_string(),
        project.name.clone(),
        project.description.clone(),
        json(&project.dimensions)?,
        project.styles.join(", "),
        project.audit.created_at.to_rfc3339(),
    ]])
}

fn room_rows(aggregate: &ProjectAggregate) -> Result<Vec<Vec<String>>> {
    aggregate
        .rooms()
        .iter()
        .map(|contents| {
            let room = &contents.room;
            Ok(vec![
                room.id.to_string(),
                room.name.clone(),
                room.room_type.to_string(),
                json(&room.dimensions)?,
                room.project.to_string(),
            ])
        })
        .collect()
}

fn furniture_rows(aggregate: &ProjectAggregate) -> Result<Vec<Vec<String>>> {
    aggregate
        .rooms()
        .iter()
        .flat_map(|contents| contents.furniture.iter())
        .map(|item| {
            Ok(vec![
                item.id.to_string(),
                item.name.clone(),
                item.furniture_type.to_string(),
                json(&item.dimensions)?,
                json(&item.position)?,
                json(&item.rotation)?,
                item.room.to_string(),
            ])
        })
        .collect()
}

/// Stage the three CSV files in a temporary directory, then zip them
///
/// The directory is removed when this returns, whether or not it succeeded.
pub fn render_csv_archive(aggregate: &ProjectAggregate) -> Result<Vec<u8>> {
    let staging = tempfile::tempdir().context("Failed to create export staging directory")?;

    let [project_csv, rooms_csv, furniture_csv] = ARCHIVE_ENTRIES.map(|n| staging.path().join(n));
    write_csv(&project_csv, &PROJECT_HEADERS, project_rows(aggregate)?)?;
    write_csv(&rooms_csv, &ROOM_HEADERS, room_rows(aggregate)?)?;
    write_csv(&furniture_csv, &FURNITURE_HEADERS, furniture_rows(aggregate)?)?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, path) in ARCHIVE_ENTRIES
        .iter()
        .zip([&project_csv, &rooms_csv, &furniture_csv])
    {
        let bytes = fs::read(path).with_context(|| format!("Failed to read staged {name}"))?;
        zip.start_file(*name, options)
            .with_context(|| format!("Failed to add {name} to archive"))?;
        zip.write_all(&bytes)?;
    }

    let archive = zip.finish().context("Failed to finish zip archive")?;
    Ok(archive.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::RoomContents;
    use crate::domain::entities::{Furniture, Project, Room};
    use crate::domain::value_objects::{
        Dimensions, FurnitureType, RoomDimensions, RoomType, UserId, Vector3,
    };
    use chrono::Utc;
    use std::io::Read;

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
        let mut entry = archive.by_name(name).expect("entry present");
        let mut text = String::new();
        entry.read_to_string(&mut text).expect("utf-8 csv");
        text
    }

    fn loft() -> ProjectAggregate {
        let owner = UserId::new();
        let project = Project::new(owner, "Loft, top", Dimensions::new(10.0, 8.0, 3.0), Utc::now())
            .with_styles(vec!["industrial".to_string(), "minimal".to_string()]);
        let room = Room::new(
            project.id,
            "Living",
            RoomType::LivingRoom,
            Vector3::ZERO,
            RoomDimensions::new(5.0, 4.0, None),
            owner,
            Utc::now(),
        );
        let sofa = Furniture::new(
            room.id,
            "Sofa",
            FurnitureType::Sofa,
            "64b7f0c2a1b2c3d4e5f60718",
            Dimensions::new(2.0, 1.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            owner,
            Utc::now(),
        );
        ProjectAggregate::new(project).with_rooms(vec![RoomContents {
            room,
            furniture: vec![sofa],
        }])
    }

    #[test]
    fn archive_holds_three_csv_files() {
        let aggregate = loft();
        let bytes = render_csv_archive(&aggregate).expect("rendered");

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).expect("valid zip");
        let mut names: Vec<_> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(names, ["furniture.csv", "project.csv", "rooms.csv"]);
    }

    #[test]
    fn cells_are_quoted_and_complex_fields_json_encoded() {
        let aggregate = loft();
        let bytes = render_csv_archive(&aggregate).expect("rendered");

        let project = read_entry(&bytes, "project.csv");
        let mut lines = project.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Name,Description,Dimensions,Styles,Created At")
        );
        let row = lines.next().expect("project row");
        assert!(row.contains("\"Loft, top\""));
        assert!(row.contains("\"industrial, minimal\""));
        assert!(row.contains(r#""{""width"":10.0,""length"":8.0,""height"":3.0}""#));

        let rooms = read_entry(&bytes, "rooms.csv");
        assert!(rooms.contains("living-room"));
        assert!(rooms.contains(&aggregate.project().id.to_string()));

        let furniture = read_entry(&bytes, "furniture.csv");
        assert!(furniture.starts_with("ID,Name,Type,Dimensions,Position,Rotation,Room ID"));
        assert!(furniture.contains(&aggregate.rooms()[0].room.id.to_string()));
    }

    #[test]
    fn empty_project_still_gets_headers() {
        let project = Project::new(UserId::new(), "Empty", Dimensions::new(1.0, 1.0, 1.0), Utc::now());
        let bytes = render_csv_archive(&ProjectAggregate::new(project)).expect("rendered");
        assert_eq!(
            read_entry(&bytes, "rooms.csv").trim_end(),
            "ID,Name,Type,Dimensions,Project ID"
        );
    }
}
