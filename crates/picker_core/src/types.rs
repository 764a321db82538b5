use std::fmt;

pub type ColorId = u64;

/// A selectable color entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorItem {
    pub id: ColorId,
    pub name: String,
    /// Packed 0xAARRGGBB.
    pub color: u32,
}

impl ColorItem {
    pub fn new(id: ColorId, name: impl Into<String>, color: u32) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.color.to_be_bytes();
        (r, g, b)
    }
}

impl fmt::Display for ColorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{:08X})", self.name, self.color)
    }
}
