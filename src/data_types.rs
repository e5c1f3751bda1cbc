//! Column type registry.
//!
//! Maps a field's type name to its [`TypeDef`]: display category, sizing
//! rules and how its default value literal is validated. Lookup is
//! case-insensitive and returns `None` for unknown types; callers decide
//! what an unknown type means for them.

use crate::types::Field;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Display category, used by renderers to color the type label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeColor {
    Integer,
    Decimal,
    Binary,
    Boolean,
    Date,
    String,
    EnumSet,
    Geometric,
    Document,
}

/// How a default literal is validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DefaultRule {
    Integer,
    Decimal,
    Bit,
    Boolean,
    Time,
    Timestamp,
    Date,
    DateTime,
    Year,
    /// Length-bounded by the field size, surrounding quotes not counted
    Text,
    /// Length-bounded, digits 0/1 only
    Binary,
    Enum,
    Set,
    Any,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDef {
    pub name: &'static str,
    pub color: TypeColor,
    pub has_check: bool,
    pub is_sized: bool,
    pub has_precision: bool,
    pub can_increment: bool,
    pub signed: bool,
    pub default_size: Option<u32>,
    pub has_quotes: bool,
    pub no_default: bool,
    rule: DefaultRule,
}

impl TypeDef {
    const fn base(name: &'static str, color: TypeColor, rule: DefaultRule) -> Self {
        Self {
            name,
            color,
            has_check: false,
            is_sized: false,
            has_precision: false,
            can_increment: false,
            signed: false,
            default_size: None,
            has_quotes: false,
            no_default: false,
            rule,
        }
    }

    const fn integer(name: &'static str) -> Self {
        Self {
            has_check: true,
            can_increment: true,
            signed: true,
            ..Self::base(name, TypeColor::Integer, DefaultRule::Integer)
        }
    }

    const fn decimal(name: &'static str) -> Self {
        Self {
            has_check: true,
            has_precision: true,
            ..Self::base(name, TypeColor::Decimal, DefaultRule::Decimal)
        }
    }

    const fn temporal(name: &'static str, rule: DefaultRule) -> Self {
        Self {
            has_quotes: true,
            ..Self::base(name, TypeColor::Date, rule)
        }
    }

    const fn text(name: &'static str, default_size: u32) -> Self {
        Self {
            has_check: true,
            is_sized: true,
            default_size: Some(default_size),
            has_quotes: true,
            ..Self::base(name, TypeColor::String, DefaultRule::Text)
        }
    }

    const fn binary(name: &'static str, default_size: u32) -> Self {
        Self {
            is_sized: true,
            default_size: Some(default_size),
            has_quotes: true,
            ..Self::base(name, TypeColor::Binary, DefaultRule::Binary)
        }
    }

    const fn opaque(name: &'static str, color: TypeColor) -> Self {
        Self {
            no_default: true,
            ..Self::base(name, color, DefaultRule::Any)
        }
    }

    /// Validate `field.default` against this type. An empty default always
    /// passes: the column simply has no default.
    pub fn check_default(&self, field: &Field) -> bool {
        let value = field.default.as_str();
        if value.is_empty() {
            return true;
        }
        let size = field.size.or(self.default_size).unwrap_or(u32::MAX) as usize;

        match self.rule {
            DefaultRule::Integer => INT_RE.is_match(value),
            DefaultRule::Decimal => DOUBLE_RE.is_match(value),
            DefaultRule::Bit => value == "0" || value == "1",
            DefaultRule::Boolean => {
                value.eq_ignore_ascii_case("true")
                    || value.eq_ignore_ascii_case("false")
                    || value == "0"
                    || value == "1"
            }
            DefaultRule::Time => TIME_RE.is_match(value),
            DefaultRule::Timestamp => datetime_in_range(value, YEAR_MIN_UNIX, YEAR_MAX_UNIX32),
            DefaultRule::Date => DATE_RE.is_match(value),
            DefaultRule::DateTime => datetime_in_range(value, YEAR_MIN, YEAR_MAX),
            DefaultRule::Year => YEAR_RE.is_match(value),
            DefaultRule::Text => {
                let len = value.chars().count();
                if has_quotes(value) { len - 2 <= size } else { len <= size }
            }
            DefaultRule::Binary => value.len() <= size && BINARY_RE.is_match(value),
            DefaultRule::Enum => field.values.iter().any(|v| v == value),
            DefaultRule::Set => value
                .split(',')
                .all(|part| field.values.iter().any(|v| v == part.trim())),
            DefaultRule::Any => true,
        }
    }

    /// Size suffix shown after the type name: `(255)`, `(10,2)` or nothing.
    pub fn format_size(&self, size: Option<u32>, precision: Option<u32>) -> String {
        if self.is_sized {
            return match size.or(self.default_size) {
                Some(size) => format!("({size})"),
                None => String::new(),
            };
        }
        if self.has_precision {
            return match (size, precision) {
                (Some(size), Some(precision)) => format!("({size},{precision})"),
                (Some(size), None) => format!("({size})"),
                _ => String::new(),
            };
        }
        String::new()
    }
}

const YEAR_MIN_UNIX: i32 = 1970;
const YEAR_MAX_UNIX32: i32 = 2038;
const YEAR_MIN: i32 = 1000;
const YEAR_MAX: i32 = 9999;

static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*$").expect("valid regex"));
static DOUBLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d*\.?\d+$").expect("valid regex"));
static BINARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[01]+$").expect("valid regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[01]?\d|2[0-3]):[0-5]?\d:[0-5]?\d$").expect("valid regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static DATETIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").expect("valid regex"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

fn datetime_in_range(value: &str, min_year: i32, max_year: i32) -> bool {
    if value.eq_ignore_ascii_case("CURRENT_TIMESTAMP") {
        return true;
    }
    DATETIME_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|year| year.as_str().parse::<i32>().ok())
        .is_some_and(|year| (min_year..=max_year).contains(&year))
}

/// Wrapped in matching single, double or back quotes.
pub fn has_quotes(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 2
        && bytes[0] == bytes[bytes.len() - 1]
        && matches!(bytes[0], b'\'' | b'"' | b'`')
}

static REGISTRY: Lazy<HashMap<&'static str, TypeDef>> = Lazy::new(|| {
    use DefaultRule as R;
    use TypeColor as C;

    let defs = [
        TypeDef::integer("TINYINT"),
        TypeDef::integer("SMALLINT"),
        TypeDef::integer("MEDIUMINT"),
        TypeDef::integer("INTEGER"),
        TypeDef::integer("BIGINT"),
        TypeDef::decimal("DECIMAL"),
        TypeDef::decimal("NUMERIC"),
        TypeDef::decimal("FLOAT"),
        TypeDef::decimal("DOUBLE"),
        TypeDef {
            has_check: true,
            has_precision: true,
            ..TypeDef::base("BIT", C::Binary, R::Bit)
        },
        TypeDef::base("BOOLEAN", C::Boolean, R::Boolean),
        TypeDef::temporal("TIME", R::Time),
        TypeDef::temporal("TIMESTAMP", R::Timestamp),
        TypeDef::temporal("DATE", R::Date),
        TypeDef::temporal("DATETIME", R::DateTime),
        TypeDef::base("YEAR", C::Date, R::Year),
        TypeDef::text("CHAR", 1),
        TypeDef::text("VARCHAR", 255),
        TypeDef::binary("BINARY", 1),
        TypeDef::binary("VARBINARY", 255),
        TypeDef::opaque("TINYBLOB", C::Binary),
        TypeDef::opaque("BLOB", C::Binary),
        TypeDef::opaque("MEDIUMBLOB", C::Binary),
        TypeDef::opaque("LONGBLOB", C::Binary),
        TypeDef::text("TINYTEXT", 65_535),
        TypeDef::text("TEXT", 65_535),
        TypeDef::text("MEDIUMTEXT", 65_535),
        TypeDef::text("LONGTEXT", 65_535),
        TypeDef {
            has_quotes: true,
            ..TypeDef::base("ENUM", C::EnumSet, R::Enum)
        },
        TypeDef {
            no_default: true,
            ..TypeDef::base("SET", C::EnumSet, R::Set)
        },
        TypeDef::opaque("GEOMETRY", C::Geometric),
        TypeDef::opaque("POINT", C::Geometric),
        TypeDef::opaque("LINESTRING", C::Geometric),
        TypeDef::opaque("POLYGON", C::Geometric),
        TypeDef::opaque("MULTIPOINT", C::Geometric),
        TypeDef::opaque("MULTILINESTRING", C::Geometric),
        TypeDef::opaque("MULTIPOLYGON", C::Geometric),
        TypeDef::opaque("GEOMETRYCOLLECTION", C::Geometric),
        TypeDef::opaque("JSON", C::Document),
    ];
    defs.into_iter().map(|def| (def.name, def)).collect()
});

/// Look up a type by name, ignoring case.
pub fn lookup(name: &str) -> Option<&'static TypeDef> {
    REGISTRY.get(name.to_ascii_uppercase().as_str())
}

/// Every registered type name, sorted.
pub fn type_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Validate a field's default literal. Unknown types never validate.
pub fn check_default(field: &Field) -> bool {
    field.validate_default().unwrap_or(false)
}

/// Size suffix for a column of type `def`.
pub fn format_type_size(def: &TypeDef, size: Option<u32>, precision: Option<u32>) -> String {
    def.format_size(size, precision)
}

impl Field {
    pub fn type_def(&self) -> Option<&'static TypeDef> {
        lookup(&self.type_name)
    }

    /// `None` when the type is not registered.
    pub fn validate_default(&self) -> Option<bool> {
        self.type_def().map(|def| def.check_default(self))
    }

    /// Type label as rendered in a field row, e.g. `VARCHAR(255)`.
    pub fn type_label(&self) -> String {
        match self.type_def() {
            Some(def) => format!("{}{}", self.type_name, def.format_size(self.size, self.precision)),
            None => self.type_name.clone(),
        }
    }
}
