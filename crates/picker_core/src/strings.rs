/// Keys for the user-visible strings the picker renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKey {
    /// Title shown while nothing is selected or the list is not loaded.
    ChangeColorTitle,
    /// Title naming the selected color. Args: `[name]`.
    ChangeColorTitleWithName,
    /// Textual save progress label. Args: `[percentage]`.
    SaveProgressMessage,
    /// Notification shown when a save fails.
    GenericError,
}

/// Resource lookup. Implementations must be pure.
pub trait Strings: Send + Sync {
    fn get(&self, key: StringKey, args: &[&str]) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishStrings;

impl EnglishStrings {
    fn template(key: StringKey) -> &'static str {
        match key {
            StringKey::ChangeColorTitle => "Change color",
            StringKey::ChangeColorTitleWithName => "Change color: {0}",
            StringKey::SaveProgressMessage => "{0}%",
            StringKey::GenericError => "Something went wrong. Please try again.",
        }
    }
}

impl Strings for EnglishStrings {
    fn get(&self, key: StringKey, args: &[&str]) -> String {
        format_template(Self::template(key), args)
    }
}

/// Replace `{n}` placeholders with positional args. Unknown indices are left as-is.
fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{index}}}"), arg);
    }
    out
}
