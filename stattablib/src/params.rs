//! Rendering parameters: package-wide defaults and per-table overrides.
//!
//! Parameters resolve through three tiers with defined precedence:
//!
//! 1. Instance overrides, set on one table
//! 2. Type defaults, baked in by the table kind (mean-difference and model
//!    tables turn the index on, for example)
//! 3. Package defaults, a process-wide store initialized at startup
//!
//! The package store is read by explicit reference ([`global`]) and only
//! mutated through [`set_global`] / [`reset_global`]; constructing a table
//! never writes to it.

use std::str::FromStr;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Horizontal alignment for cells and notes.
///
/// Parses from both the short codes (`l`, `c`, `r`) and the long keywords
/// (`left`, `center`, `right`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Short code used by the LaTeX backend (`l`, `c`, `r`).
    pub fn code(&self) -> char {
        match self {
            Alignment::Left => 'l',
            Alignment::Center => 'c',
            Alignment::Right => 'r',
        }
    }

    /// Long keyword used by the HTML backend.
    pub fn keyword(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl FromStr for Alignment {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l" | "left" => Ok(Alignment::Left),
            "c" | "center" => Ok(Alignment::Center),
            "r" | "right" => Ok(Alignment::Right),
            other => Err(TableError::InvalidAlignment(other.to_string())),
        }
    }
}

/// Where the LaTeX caption and label go relative to the tabular block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptionLocation {
    Top,
    Bottom,
}

impl FromStr for CaptionLocation {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(CaptionLocation::Top),
            "bottom" => Ok(CaptionLocation::Bottom),
            other => Err(TableError::InvalidCaptionLocation(other.to_string())),
        }
    }
}

/// Fully resolved parameter set used by the renderers.
///
/// Also the shape of the package-wide default store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageParams {
    /// Spaces on either side of every plain-text cell
    pub padding: usize,
    /// Plain-text top rule character
    pub header_char: String,
    /// Plain-text bottom rule character
    pub footer_char: String,
    /// Plain-text left/right border string
    pub border_char: String,
    /// Plain-text rule between column labels and body
    pub mid_rule_char: String,
    /// Emit the LaTeX top rule twice
    pub double_top_rule: bool,
    /// Emit the LaTeX bottom rule twice
    pub double_bottom_rule: bool,
    /// Emit the plain-text top rule twice
    pub ascii_double_top_rule: bool,
    /// Emit the plain-text bottom rule twice
    pub ascii_double_bottom_rule: bool,
    /// Decimal places for the default numeric formatter
    pub sig_digits: usize,
    /// Thousands separator for the default numeric formatter
    pub thousands_sep: String,
    /// LaTeX caption/label placement
    pub caption_location: CaptionLocation,
    /// Alignment of body cells in plain text
    pub column_alignment: Alignment,
    /// Alignment of index cells in plain text
    pub index_alignment: Alignment,
    /// Render the leading index column
    pub include_index: bool,
    /// Render the row of column labels
    pub show_columns: bool,
}

impl Default for PackageParams {
    fn default() -> Self {
        Self {
            padding: 2,
            header_char: "=".to_string(),
            footer_char: "-".to_string(),
            border_char: String::new(),
            mid_rule_char: "-".to_string(),
            double_top_rule: false,
            double_bottom_rule: false,
            ascii_double_top_rule: false,
            ascii_double_bottom_rule: false,
            sig_digits: 3,
            thousands_sep: ",".to_string(),
            caption_location: CaptionLocation::Top,
            column_alignment: Alignment::Center,
            index_alignment: Alignment::Left,
            include_index: false,
            show_columns: true,
        }
    }
}

impl PackageParams {
    /// Check the fields that can hold invalid values.
    pub fn validate(&self) -> crate::Result<()> {
        check_padding(self.padding)?;
        for s in [
            &self.header_char,
            &self.footer_char,
            &self.border_char,
            &self.mid_rule_char,
        ] {
            check_rule_char(s)?;
        }
        Ok(())
    }
}

pub(crate) fn check_padding(padding: usize) -> crate::Result<()> {
    if padding > 20 {
        return Err(TableError::PaddingOutOfRange(padding));
    }
    Ok(())
}

fn check_rule_char(s: &str) -> crate::Result<()> {
    if s.chars().count() > 1 {
        return Err(TableError::InvalidRuleChar(s.to_string()));
    }
    Ok(())
}

static GLOBAL: Lazy<RwLock<PackageParams>> =
    Lazy::new(|| RwLock::new(PackageParams::default()));

/// Snapshot of the package-wide defaults.
pub fn global() -> PackageParams {
    GLOBAL
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Replace the package-wide defaults. Intended to run once at process
/// start, before any tables exist.
pub fn set_global(params: PackageParams) -> crate::Result<()> {
    params.validate()?;
    *GLOBAL
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = params;
    Ok(())
}

/// Restore the package-wide defaults to their shipped values.
pub fn reset_global() {
    *GLOBAL
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = PackageParams::default();
}

/// A sparse parameter set: only the fields a tier wants to pin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialParams {
    pub padding: Option<usize>,
    pub header_char: Option<String>,
    pub footer_char: Option<String>,
    pub border_char: Option<String>,
    pub mid_rule_char: Option<String>,
    pub double_top_rule: Option<bool>,
    pub double_bottom_rule: Option<bool>,
    pub ascii_double_top_rule: Option<bool>,
    pub ascii_double_bottom_rule: Option<bool>,
    pub sig_digits: Option<usize>,
    pub thousands_sep: Option<String>,
    pub caption_location: Option<CaptionLocation>,
    pub column_alignment: Option<Alignment>,
    pub index_alignment: Option<Alignment>,
    pub include_index: Option<bool>,
    pub show_columns: Option<bool>,
}

impl PartialParams {
    fn apply(&self, base: &mut PackageParams) {
        if let Some(v) = self.padding {
            base.padding = v;
        }
        if let Some(v) = &self.header_char {
            base.header_char = v.clone();
        }
        if let Some(v) = &self.footer_char {
            base.footer_char = v.clone();
        }
        if let Some(v) = &self.border_char {
            base.border_char = v.clone();
        }
        if let Some(v) = &self.mid_rule_char {
            base.mid_rule_char = v.clone();
        }
        if let Some(v) = self.double_top_rule {
            base.double_top_rule = v;
        }
        if let Some(v) = self.double_bottom_rule {
            base.double_bottom_rule = v;
        }
        if let Some(v) = self.ascii_double_top_rule {
            base.ascii_double_top_rule = v;
        }
        if let Some(v) = self.ascii_double_bottom_rule {
            base.ascii_double_bottom_rule = v;
        }
        if let Some(v) = self.sig_digits {
            base.sig_digits = v;
        }
        if let Some(v) = &self.thousands_sep {
            base.thousands_sep = v.clone();
        }
        if let Some(v) = self.caption_location {
            base.caption_location = v;
        }
        if let Some(v) = self.column_alignment {
            base.column_alignment = v;
        }
        if let Some(v) = self.index_alignment {
            base.index_alignment = v;
        }
        if let Some(v) = self.include_index {
            base.include_index = v;
        }
        if let Some(v) = self.show_columns {
            base.show_columns = v;
        }
    }
}

/// Per-table parameters: a type-default tier plus an instance-override
/// tier, resolved against the package store on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableParams {
    type_defaults: PartialParams,
    overrides: PartialParams,
}

impl TableParams {
    /// Parameters with no type defaults (generic tables).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters with a type-default tier (specialized tables).
    pub fn with_type_defaults(type_defaults: PartialParams) -> Self {
        Self {
            type_defaults,
            overrides: PartialParams::default(),
        }
    }

    /// Resolve instance > type default > package default into one value set.
    pub fn resolved(&self) -> PackageParams {
        let mut params = global();
        self.type_defaults.apply(&mut params);
        self.overrides.apply(&mut params);
        params
    }

    /// Drop every instance override, falling back to type defaults.
    pub fn clear_overrides(&mut self) {
        self.overrides = PartialParams::default();
    }

    /// Drop instance overrides and type defaults both, falling all the way
    /// back to the package store.
    pub fn reset_to_defaults(&mut self) {
        self.overrides = PartialParams::default();
        self.type_defaults = PartialParams::default();
    }

    pub fn set_padding(&mut self, padding: usize) -> crate::Result<()> {
        check_padding(padding)?;
        self.overrides.padding = Some(padding);
        Ok(())
    }

    pub fn set_header_char(&mut self, s: impl Into<String>) -> crate::Result<()> {
        let s = s.into();
        check_rule_char(&s)?;
        self.overrides.header_char = Some(s);
        Ok(())
    }

    pub fn set_footer_char(&mut self, s: impl Into<String>) -> crate::Result<()> {
        let s = s.into();
        check_rule_char(&s)?;
        self.overrides.footer_char = Some(s);
        Ok(())
    }

    pub fn set_border_char(&mut self, s: impl Into<String>) -> crate::Result<()> {
        let s = s.into();
        check_rule_char(&s)?;
        self.overrides.border_char = Some(s);
        Ok(())
    }

    pub fn set_mid_rule_char(&mut self, s: impl Into<String>) -> crate::Result<()> {
        let s = s.into();
        check_rule_char(&s)?;
        self.overrides.mid_rule_char = Some(s);
        Ok(())
    }

    pub fn set_double_top_rule(&mut self, on: bool) {
        self.overrides.double_top_rule = Some(on);
    }

    pub fn set_double_bottom_rule(&mut self, on: bool) {
        self.overrides.double_bottom_rule = Some(on);
    }

    pub fn set_ascii_double_top_rule(&mut self, on: bool) {
        self.overrides.ascii_double_top_rule = Some(on);
    }

    pub fn set_ascii_double_bottom_rule(&mut self, on: bool) {
        self.overrides.ascii_double_bottom_rule = Some(on);
    }

    pub fn set_sig_digits(&mut self, digits: usize) {
        self.overrides.sig_digits = Some(digits);
    }

    pub fn set_thousands_sep(&mut self, sep: impl Into<String>) {
        self.overrides.thousands_sep = Some(sep.into());
    }

    pub fn set_caption_location(&mut self, location: CaptionLocation) {
        self.overrides.caption_location = Some(location);
    }

    pub fn set_column_alignment(&mut self, alignment: Alignment) {
        self.overrides.column_alignment = Some(alignment);
    }

    pub fn set_index_alignment(&mut self, alignment: Alignment) {
        self.overrides.index_alignment = Some(alignment);
    }

    pub fn set_include_index(&mut self, on: bool) {
        self.overrides.include_index = Some(on);
    }

    pub fn set_show_columns(&mut self, on: bool) {
        self.overrides.show_columns = Some(on);
    }
}
