//! PDF project report
//!
//! The report is laid out as a list of text lines first, then paginated onto
//! A4 pages using the built-in Helvetica font.

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::domain::aggregates::ProjectAggregate;
use crate::domain::value_objects::{Dimensions, RoomDimensions, Vector3};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const FONT: &str = "F1";

/// One line of report text
#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    size: i64,
    indent: i64,
    centered: bool,
}

impl Line {
    fn new(text: impl Into<String>, size: i64) -> Self {
        Self {
            text: text.into(),
            size,
            indent: 0,
            centered: false,
        }
    }

    fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    fn indented(mut self, indent: i64) -> Self {
        self.indent = indent;
        self
    }

    fn blank() -> Self {
        Self::new("", 10)
    }

    fn height(&self) -> i64 {
        self.size * 14 / 10
    }

    /// Rough Helvetica advance width
    fn width(&self) -> i64 {
        self.text.chars().count() as i64 * self.size / 2
    }
}

fn or_na(text: &str) -> &str {
    if text.trim().is_empty() {
        "N/A"
    } else {
        text
    }
}

fn dimensions(d: &Dimensions) -> String {
    format!("{} x {} x {}", d.width, d.length, d.height)
}

fn room_dimensions(d: &RoomDimensions) -> String {
    match d.height {
        Some(h) => format!("{} x {} x {}", d.width, d.length, h),
        None => format!("{} x {}", d.width, d.length),
    }
}

fn point(v: &Vector3) -> String {
    format!("({}, {}, {})", v.x, v.y, v.z)
}

fn report_lines(aggregate: &ProjectAggregate) -> Vec<Line> {
    let project = aggregate.project();
    let styles = project.styles.join(", ");

    let mut lines = vec![
        Line::new("Project Report", 25).centered(),
        Line::new(project.name.as_str(), 16).centered(),
        Line::blank(),
        Line::new("Project Details:", 12),
        Line::new(format!("Description: {}", or_na(&project.description)), 10),
        Line::new(format!("Dimensions: {}", dimensions(&project.dimensions)), 10),
        Line::new(format!("Styles: {}", or_na(&styles)), 10),
        Line::new(
            format!("Created: {}", project.audit.created_at.format("%Y-%m-%d %H:%M UTC")),
            10,
        ),
        Line::blank(),
        Line::new("Rooms:", 12),
    ];

    if aggregate.rooms().is_empty() {
        lines.push(Line::new("No rooms in this project.", 10));
        return lines;
    }

    for (index, contents) in aggregate.rooms().iter().enumerate() {
        let room = &contents.room;
        lines.push(Line::blank());
        lines.push(Line::new(format!("Room {}: {}", index + 1, room.name), 11));
        lines.push(Line::new(format!("Type: {}", room.type_label()), 10));
        lines.push(Line::new(
            format!("Dimensions: {}", room_dimensions(&room.dimensions)),
            10,
        ));

        if contents.furniture.is_empty() {
            lines.push(Line::new("No furniture in this room.", 10));
            continue;
        }

        lines.push(Line::new("Furniture:", 10));
        for (i, item) in contents.furniture.iter().enumerate() {
            lines.push(Line::new(
                format!("{}. {} ({})", i + 1, item.name, item.type_label()),
                9,
            ));
            lines.push(
                Line::new(format!("Dimensions: {}", dimensions(&item.dimensions)), 8).indented(12),
            );
            lines.push(Line::new(format!("Position: {}", point(&item.position)), 8).indented(12));
        }
    }

    lines
}

/// Helvetica through the standard encoding only covers ASCII reliably
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

/// Split a line that would overflow the printable width at word boundaries
fn wrap(line: Line) -> Vec<Line> {
    let usable = PAGE_WIDTH - 2 * MARGIN - line.indent;
    let max_chars = (usable * 2 / line.size).max(1) as usize;
    if line.text.chars().count() <= max_chars {
        return vec![line];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.text.split_whitespace() {
        let candidate_len = current.chars().count() + word.chars().count() + 1;
        if !current.is_empty() && candidate_len > max_chars {
            out.push(Line {
                text: std::mem::take(&mut current),
                ..line.clone()
            });
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(Line {
            text: current,
            ..line
        });
    }
    out
}

/// Place lines top to bottom, starting a new page when one is full
fn paginate(lines: Vec<Line>) -> Vec<Vec<Operation>> {
    let mut pages = Vec::new();
    let mut ops = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines.into_iter().flat_map(wrap) {
        let height = line.height();
        if y - height < MARGIN && !ops.is_empty() {
            pages.push(std::mem::take(&mut ops));
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= height;
        if line.text.is_empty() {
            continue;
        }

        let x = if line.centered {
            ((PAGE_WIDTH - line.width()) / 2).max(MARGIN)
        } else {
            MARGIN + line.indent
        };
        ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![FONT.into(), Object::Integer(line.size)]),
            Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
            Operation::new("Tj", vec![Object::string_literal(sanitize(&line.text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    if !ops.is_empty() || pages.is_empty() {
        pages.push(ops);
    }
    pages
}

/// Render the project report as PDF bytes
pub fn render_pdf_report(aggregate: &ProjectAggregate) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT => font_id },
    });

    let mut kids = Vec::new();
    for operations in paginate(report_lines(aggregate)) {
        let content = Content { operations };
        let encoded = content.encode().context("Failed to encode page content")?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).context("Failed to write PDF")?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::RoomContents;
    use crate::domain::entities::{Furniture, Project, Room};
    use crate::domain::value_objects::{FurnitureType, RoomType, UserId};
    use chrono::Utc;

    fn project() -> Project {
        Project::new(UserId::new(), "Loft", Dimensions::new(10.0, 8.0, 3.0), Utc::now())
    }

    fn room(project: &Project, name: &str) -> Room {
        Room::new(
            project.id,
            name,
            RoomType::Bedroom,
            Vector3::ZERO,
            RoomDimensions::new(4.0, 3.0, None),
            project.owner,
            Utc::now(),
        )
    }

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn empty_project_says_so() {
        let lines = report_lines(&ProjectAggregate::new(project()));
        let texts = texts(&lines);
        assert_eq!(texts[0], "Project Report");
        assert!(texts.contains(&"Description: N/A"));
        assert!(texts.contains(&"Styles: N/A"));
        assert!(texts.contains(&"Dimensions: 10 x 8 x 3"));
        assert_eq!(texts.last(), Some(&"No rooms in this project."));
    }

    #[test]
    fn rooms_list_their_furniture() {
        let project = project();
        let empty = room(&project, "Guest");
        let bedroom = room(&project, "Master");
        let bed = Furniture::new(
            bedroom.id,
            "Bed",
            FurnitureType::Bed,
            "64b7f0c2a1b2c3d4e5f60718",
            Dimensions::new(1.6, 2.0, 0.5),
            Vector3::new(1.0, 0.0, 2.0),
            project.owner,
            Utc::now(),
        );
        let aggregate = ProjectAggregate::new(project).with_rooms(vec![
            RoomContents {
                room: empty,
                furniture: Vec::new(),
            },
            RoomContents {
                room: bedroom,
                furniture: vec![bed],
            },
        ]);

        let lines = report_lines(&aggregate);
        let texts = texts(&lines);
        assert!(texts.contains(&"Room 1: Guest"));
        assert!(texts.contains(&"No furniture in this room."));
        assert!(texts.contains(&"Room 2: Master"));
        assert!(texts.contains(&"1. Bed (bed)"));
        assert!(texts.contains(&"Dimensions: 1.6 x 2 x 0.5"));
        assert!(texts.contains(&"Position: (1, 0, 2)"));
    }

    #[test]
    fn long_lines_wrap_within_the_margins() {
        let long = Line::new(format!("Description: {}", "word ".repeat(80)), 10);
        let wrapped = wrap(long);
        assert!(wrapped.len() > 1);
        for line in &wrapped {
            assert!(line.width() <= PAGE_WIDTH - 2 * MARGIN);
        }
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(sanitize("Café №1"), "Caf? ?1");
    }

    #[test]
    fn report_is_a_loadable_pdf() {
        let bytes = render_pdf_report(&ProjectAggregate::new(project())).expect("rendered");
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).expect("parseable");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn many_rooms_flow_onto_more_pages() {
        let project = project();
        let rooms = (0..60)
            .map(|i| RoomContents {
                room: room(&project, &format!("Room {i}")),
                furniture: Vec::new(),
            })
            .collect();
        let bytes =
            render_pdf_report(&ProjectAggregate::new(project).with_rooms(rooms)).expect("rendered");
        let doc = Document::load_mem(&bytes).expect("parseable");
        assert!(doc.get_pages().len() > 1);
    }
}
