//! Save record codec
//!
//! A save record is line-oriented text. The first line is the literal header
//! `key,value`; every following line is one `KEY,VALUE` pair split at the
//! first comma, so values may themselves contain commas.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{Display, Write};

use chrono::{DateTime, Utc};

use ak_core::object::{Inventory, Item, ItemKind};
use ak_core::player::{Player, PlayerClass, StatusFlags};
use ak_core::{MAX_AREA, MIN_INVENTORY_CAPACITY};

use crate::SaveError;

/// First line of every save record
pub const HEADER: &str = "key,value";

/// Encode a player as a save record
pub fn encode(player: &Player, saved_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    put(&mut out, "key", "value");
    put(&mut out, "NAME", escape(&player.name));
    put(&mut out, "CLASS", player.class.code());
    put(&mut out, "HP", player.hp);
    put(&mut out, "MAX_HP", player.max_hp);
    put(&mut out, "DAMAGE", player.damage);
    put(&mut out, "XP", player.xp);
    put(&mut out, "LEVEL", player.level);
    put(&mut out, "KILLS", player.kills);
    put(&mut out, "GOLD", player.gold);
    put(&mut out, "AREA", player.area_level);
    put(&mut out, "IS_POISONED", flag(player.status, StatusFlags::POISONED));
    put(&mut out, "IS_SHIELDED", flag(player.status, StatusFlags::SHIELDED));
    put(&mut out, "TURN_SKIPPED", flag(player.status, StatusFlags::TURN_SKIPPED));
    put(&mut out, "INV_SIZE", player.inventory.len());
    put(&mut out, "INV_CAPACITY", player.inventory.capacity());
    for (i, item) in player.inventory.iter().enumerate() {
        put(&mut out, &format!("ITEM_{i}_TYPE"), item.kind.code());
        put(&mut out, &format!("ITEM_{i}_NAME"), escape(&item.name));
        put(&mut out, &format!("ITEM_{i}_STRENGTH"), item.value);
    }
    put(&mut out, "TIMESTAMP", saved_at.timestamp());
    out
}

fn put(out: &mut String, key: &str, value: impl Display) {
    // writing into a String cannot fail
    let _ = writeln!(out, "{key},{value}");
}

/// Escape line breaks and backslashes so a text value stays on one line
fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

fn flag(status: StatusFlags, bit: StatusFlags) -> i32 {
    i32::from(status.contains(bit))
}

/// Parsed key/value pairs of a record. Later duplicates win.
pub(crate) struct Fields<'a> {
    map: HashMap<&'a str, &'a str>,
}

impl<'a> Fields<'a> {
    pub(crate) fn parse(text: &'a str) -> Result<Self, SaveError> {
        let mut lines = text.lines();
        match lines.next() {
            Some(first) if first.trim_end() == HEADER => {}
            _ => return Err(SaveError::Corrupted("missing header".to_string())),
        }

        let mut map = HashMap::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            match line.split_once(',') {
                Some((key, value)) => {
                    map.insert(key, value);
                }
                None => tracing::warn!(line, "ignoring save line without a comma"),
            }
        }
        Ok(Self { map })
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).copied()
    }

    /// Text value with escapes resolved
    pub(crate) fn text(&self, key: &str) -> Option<Cow<'a, str>> {
        self.raw(key).map(unescape)
    }

    pub(crate) fn int(&self, key: &str) -> Result<Option<i64>, SaveError> {
        self.raw(key)
            .map(|raw| {
                raw.trim().parse::<i64>().map_err(|_| {
                    SaveError::Corrupted(format!("{key} is not an integer: {raw:?}"))
                })
            })
            .transpose()
    }

    fn int32(&self, key: &str) -> Result<Option<i32>, SaveError> {
        self.int(key)?
            .map(|v| {
                i32::try_from(v)
                    .map_err(|_| SaveError::Corrupted(format!("{key} out of range: {v}")))
            })
            .transpose()
    }

    fn set(&self, key: &str, field: &mut i32) -> Result<(), SaveError> {
        if let Some(value) = self.int32(key)? {
            *field = value;
        }
        Ok(())
    }
}

/// Rebuild a player from a save record
pub fn decode(text: &str) -> Result<Player, SaveError> {
    let fields = Fields::parse(text)?;

    let name = fields
        .text("NAME")
        .ok_or_else(|| SaveError::Corrupted("missing NAME".to_string()))?;

    let class = match fields.int32("CLASS")? {
        Some(code) => PlayerClass::from_code(code)
            .ok_or_else(|| SaveError::Corrupted(format!("unknown class code {code}")))?,
        None => {
            tracing::warn!(name = %name, "save has no CLASS, defaulting to Paladin");
            PlayerClass::default()
        }
    };

    let mut player = Player::new(name, class);
    fields.set("HP", &mut player.hp)?;
    fields.set("MAX_HP", &mut player.max_hp)?;
    fields.set("DAMAGE", &mut player.damage)?;
    fields.set("XP", &mut player.xp)?;
    fields.set("LEVEL", &mut player.level)?;
    fields.set("KILLS", &mut player.kills)?;
    fields.set("GOLD", &mut player.gold)?;
    fields.set("AREA", &mut player.area_level)?;

    player.max_hp = player.max_hp.max(0);
    player.hp = player.hp.clamp(0, player.max_hp);
    player.damage = player.damage.max(0);
    player.level = player.level.max(1);
    player.xp = player.xp.max(0);
    player.gold = player.gold.max(0);
    player.kills = player.kills.max(0);
    player.area_level = player.area_level.clamp(1, MAX_AREA);

    for (key, bit) in [
        ("IS_POISONED", StatusFlags::POISONED),
        ("IS_SHIELDED", StatusFlags::SHIELDED),
        ("TURN_SKIPPED", StatusFlags::TURN_SKIPPED),
    ] {
        let on = fields.int(key)?.is_some_and(|v| v != 0);
        player.status.set(bit, on);
    }

    // each entry needs its own keys, so the map size bounds the loop
    let size = fields
        .int("INV_SIZE")?
        .unwrap_or(0)
        .clamp(0, fields.len() as i64);
    let capacity = fields
        .int("INV_CAPACITY")?
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(0)
        .max(MIN_INVENTORY_CAPACITY);
    player.inventory = Inventory::with_capacity(capacity);

    for i in 0..size {
        let Some(item) = decode_item(&fields, i)? else {
            tracing::warn!(index = i, "skipping incomplete inventory entry");
            continue;
        };
        if let Err(full) = player.inventory.add(item) {
            tracing::warn!(item = %full.item.name, capacity, "dropping item beyond capacity");
        }
    }

    Ok(player)
}

fn decode_item(fields: &Fields<'_>, i: i64) -> Result<Option<Item>, SaveError> {
    let (Some(code), Some(name), Some(value)) = (
        fields.int32(&format!("ITEM_{i}_TYPE"))?,
        fields.text(&format!("ITEM_{i}_NAME")),
        fields.int32(&format!("ITEM_{i}_STRENGTH"))?,
    ) else {
        return Ok(None);
    };
    let kind = ItemKind::from_code(code)
        .ok_or_else(|| SaveError::Corrupted(format!("unknown item type {code}")))?;
    Ok(Some(Item::new(name, kind, value)))
}
