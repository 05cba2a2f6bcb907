//! Structural conversion from the Sponge Schematic v3 layout to v2.
//!
//! Sponge Schematic v3 (MC 1.20.5+, WorldEdit 7.3+) restructured the NBT
//! layout compared to v2 (WorldEdit 7.2.x):
//!
//! ```text
//! v3: Root("") -> Schematic -> Version, Blocks -> {Palette, Data, BlockEntities}
//!     BlockEntity: {Id, Pos, Data: {id, Items, ...}}
//!     Item: {id, count(Int), Slot, components}
//!
//! v2: Root("Schematic") -> Version, Palette, PaletteMax, BlockData, BlockEntities
//!     BlockEntity: {Id, Pos, Items, ...}
//!     Item: {id, Count(Byte), Slot}
//! ```
//!
//! The conversion is a pure function over the tree: every entry the rules
//! below do not touch passes through unchanged, in its original position.
//! Missing optional structure is never an error; the corresponding derived
//! entries are simply omitted.
//!
//! Known limitations:
//! - item components (enchantments, damage, custom names) are stripped
//! - sign text (front_text/back_text vs Text1-Text4) is not converted
//! - blocks/items that do not exist in the target MC version are lost

use crate::{Compound, Document, Entry, List, Tag, Value};

/// Platform-specific entity tags (Paper/Bukkit/Spigot) with no counterpart
/// in the target dialect.
const PLATFORM_TAGS: [&str; 9] = [
    "Paper.SpawnReason",
    "Paper.Origin",
    "Paper.OriginWorld",
    "Paper.ShouldBurnInDay",
    "Bukkit.updateLevel",
    "Bukkit.Aware",
    "Spigot.ticksLived",
    "WorldUUIDMost",
    "WorldUUIDLeast",
];

/// What a conversion did, for progress reporting. The converter itself
/// never prints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    /// The working compound's `Version` value, when it was integer-kinded.
    pub source_version: Option<i64>,
    /// Palette entry count, when a `Blocks.Palette` was lifted.
    pub palette_entries: Option<usize>,
    /// Block entity count, when a `Blocks.BlockEntities` list was rebuilt.
    pub block_entities: Option<usize>,
    /// How many rebuilt block entities carried an `Items` entry.
    pub block_entities_with_items: usize,
    /// Entity count, when an `Entities` list was rebuilt.
    pub entities: Option<usize>,
}

/// A rewritten document together with its [`Summary`].
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub document: Document,
    pub summary: Summary,
}

/// Rewrites a v3 document into the v2 layout.
///
/// Tolerates already-unwrapped and already-v2 input: feeding a v2 document
/// back through changes only the `Version` value and the root name.
pub fn convert_document(input: &Document) -> Conversion {
    let working = unwrap_root(input);
    let mut summary = Summary {
        source_version: working.get("Version").and_then(Value::as_i64),
        ..Summary::default()
    };

    let mut out = Compound::new();
    for entry in working.iter() {
        match entry.name.as_str() {
            "Version" => out.push("Version", Value::Int(2)),
            "Entities" => {
                if let Some(entities) = convert_entities(&entry.value) {
                    summary.entities = Some(entities.len());
                    out.push("Entities", Value::List(entities));
                }
            }
            "Blocks" => match entry.value.as_compound() {
                Some(blocks) => expand_blocks(blocks, &mut out, &mut summary),
                None => out.entries.push(entry.clone()),
            },
            _ => out.entries.push(entry.clone()),
        }
    }

    Conversion {
        document: Document {
            root_name: "Schematic".into(),
            root: out,
        },
        summary,
    }
}

/// v3 nests everything under a `Schematic` entry of an anonymous root; v2
/// puts it directly in a root named `Schematic`. Either shape (and
/// anything else) is accepted.
fn unwrap_root(document: &Document) -> &Compound {
    if document.root_name.is_empty() || document.root_name == "Schematic" {
        if let Some(Value::Compound(inner)) = document.root.get("Schematic") {
            return inner;
        }
    }
    &document.root
}

/// Rebuilds a non-empty `Entities` list; an empty or non-list value yields
/// `None` and the entry is dropped.
fn convert_entities(value: &Value) -> Option<List> {
    let list = value.as_list()?;
    if list.is_empty() {
        return None;
    }
    let items = list
        .items
        .iter()
        .map(|item| match item.as_compound() {
            Some(entity) => Value::Compound(convert_entity(entity)),
            None => item.clone(),
        })
        .collect();
    Some(List {
        element_tag: Tag::Compound,
        items,
    })
}

/// v3 entity `{Id, Pos, Data: {id, Pos, ...}}` becomes a flat v2 entity:
/// Id and Pos first, then the unwrapped Data entries (minus the duplicated
/// lowercase `id` and inner `Pos`), then the fixups.
fn convert_entity(entity: &Compound) -> Compound {
    let mut assembled: Vec<Entry> = Vec::new();
    if let Some(id) = entity.get("Id") {
        assembled.push(Entry {
            name: "Id".into(),
            value: id.clone(),
        });
    }
    if let Some(pos) = entity.get("Pos") {
        assembled.push(Entry {
            name: "Pos".into(),
            value: pos.clone(),
        });
    }
    if let Some(Value::Compound(data)) = entity.get("Data") {
        for entry in data.iter() {
            if entry.name == "id" || entry.name == "Pos" {
                continue;
            }
            assembled.push(entry.clone());
        }
    }
    fix_entity_entries(assembled)
}

/// Entity-level fixups:
/// - platform-only diagnostic tags are dropped
/// - `block_pos` (IntArray of 3) becomes trailing TileX/TileY/TileZ ints
/// - an `Item` compound gets the item conversion in place
fn fix_entity_entries(entries: Vec<Entry>) -> Compound {
    let mut out = Compound::new();
    let mut tile = None;
    for entry in entries {
        if PLATFORM_TAGS.contains(&entry.name.as_str()) {
            continue;
        }
        if entry.name == "block_pos" {
            if let Value::IntArray(elements) = &entry.value {
                if let [x, y, z] = elements[..] {
                    tile = Some([x, y, z]);
                    continue;
                }
            }
        }
        if entry.name == "Item" {
            if let Value::Compound(item) = &entry.value {
                out.push("Item", Value::Compound(convert_item(item)));
                continue;
            }
        }
        out.entries.push(entry);
    }
    if let Some([x, y, z]) = tile {
        out.push("TileX", Value::Int(x));
        out.push("TileY", Value::Int(y));
        out.push("TileZ", Value::Int(z));
    }
    out
}

/// Lifts the sub-entries of a v3 `Blocks` compound to the working-compound
/// level: `Palette` (plus derived `PaletteMax`), `Data` renamed to
/// `BlockData`, and a rebuilt `BlockEntities` list.
fn expand_blocks(blocks: &Compound, out: &mut Compound, summary: &mut Summary) {
    if let Some(palette) = blocks.get("Palette") {
        out.push("Palette", palette.clone());
        let len = palette.as_compound().map_or(0, Compound::len);
        out.push("PaletteMax", Value::Int(len as i32));
        summary.palette_entries = Some(len);
    }
    if let Some(data) = blocks.get("Data") {
        out.push("BlockData", data.clone());
    }
    match blocks.get("BlockEntities") {
        Some(Value::List(list)) => {
            let items: Vec<Value> = list
                .items
                .iter()
                .map(|item| match item.as_compound() {
                    Some(block_entity) => {
                        Value::Compound(convert_block_entity(block_entity, summary))
                    }
                    None => item.clone(),
                })
                .collect();
            summary.block_entities = Some(items.len());
            out.push(
                "BlockEntities",
                Value::List(List {
                    element_tag: Tag::Compound,
                    items,
                }),
            );
        }
        Some(other) => out.push("BlockEntities", other.clone()),
        None => {}
    }
}

/// v3 block entity `{Id, Pos, Data: {id, Items, components, ...}}` becomes
/// a flat v2 block entity: Id and Pos, then the unwrapped Data entries with
/// `id` and `components` dropped and `Items` run through the item-list
/// conversion.
fn convert_block_entity(source: &Compound, summary: &mut Summary) -> Compound {
    let mut out = Compound::new();
    if let Some(id) = source.get("Id") {
        out.push("Id", id.clone());
    }
    if let Some(pos) = source.get("Pos") {
        out.push("Pos", pos.clone());
    }
    if let Some(Value::Compound(data)) = source.get("Data") {
        let mut has_items = false;
        for entry in data.iter() {
            match entry.name.as_str() {
                "id" | "components" => {}
                "Items" => {
                    has_items = true;
                    out.push("Items", convert_item_list(&entry.value));
                }
                _ => out.entries.push(entry.clone()),
            }
        }
        if has_items {
            summary.block_entities_with_items += 1;
        }
    }
    out
}

/// Item format change between MC 1.21+ and 1.20.1:
/// - `count` (any integer kind) becomes `Count` (Byte), clamped to 0-127
/// - the `components` compound is removed, losing what it carried
fn convert_item(item: &Compound) -> Compound {
    let mut out = Compound::new();
    for entry in item.iter() {
        match entry.name.as_str() {
            "count" => match entry.value.as_i64() {
                Some(count) => out.push("Count", Value::Byte(count.clamp(0, 127) as i8)),
                None => out.entries.push(entry.clone()),
            },
            "components" => {}
            _ => out.entries.push(entry.clone()),
        }
    }
    out
}

/// Maps the item conversion over a list's compound elements; any other
/// value passes through unchanged.
fn convert_item_list(value: &Value) -> Value {
    let Value::List(list) = value else {
        return value.clone();
    };
    let items = list
        .items
        .iter()
        .map(|item| match item.as_compound() {
            Some(item_compound) => Value::Compound(convert_item(item_compound)),
            None => item.clone(),
        })
        .collect();
    Value::List(List {
        element_tag: list.element_tag,
        items,
    })
}
