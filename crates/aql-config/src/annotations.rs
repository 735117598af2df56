use std::any::type_name;

use documented::{Documented, DocumentedFields};
use toml_edit::{Decor, Item, RawString, Table};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Appends documentation lines as TOML comments to the given `Decor`.
///
/// Each line of `docs` becomes a `# ` comment line, added after any comment
/// already present in the prefix.
pub fn append_docs_as_toml_comments(decor: &mut Decor, docs: &str) {
    let comments: String = docs
        .lines()
        .map(|line| {
            if line.is_empty() {
                "#\n".to_string()
            } else {
                format!("# {line}\n")
            }
        })
        .collect();

    let prefix = match decor.prefix().and_then(RawString::as_str) {
        None | Some("") => comments,
        Some(existing) if existing.ends_with('\n') => format!("{existing}#\n{comments}"),
        Some(existing) => format!("{existing}\n#\n{comments}"),
    };
    decor.set_prefix(prefix);
}

/// Adds the field docs of `T` above each matching key of `table`.
///
/// Non-root tables also get the container docs of `T` above their header.
/// Keys that `T` does not document are left bare.
pub fn annotate_toml_table<T>(table: &mut Table, is_root: bool) -> Result<()>
where
    T: Documented + DocumentedFields,
{
    if !is_root {
        append_docs_as_toml_comments(table.decor_mut(), T::DOCS);
    }

    for (mut key, item) in table.iter_mut() {
        let name = key.get().to_string();
        let Ok(docs) = T::get_field_docs(&name) else {
            debug!(
                "Field '{}' has no documentation on '{}'",
                name,
                type_name::<T>()
            );
            continue;
        };

        match item {
            Item::None => return Err(ConfigError::UnexpectedTomlItem(name)),
            Item::Value(_) => append_docs_as_toml_comments(key.leaf_decor_mut(), docs),
            Item::Table(sub_table) => append_docs_as_toml_comments(sub_table.decor_mut(), docs),
            Item::ArrayOfTables(array) => {
                if let Some(first) = array.iter_mut().next() {
                    append_docs_as_toml_comments(first.decor_mut(), docs);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use toml_edit::{Decor, DocumentMut};

    use super::*;
    use crate::preset::Preset;

    fn prefix(decor: &Decor) -> String {
        decor
            .prefix()
            .and_then(|p| p.as_str())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_append_docs_as_toml_comments() {
        let mut decor = Decor::new("", "");
        append_docs_as_toml_comments(&mut decor, "Line 1\n\nLine 2");

        assert_eq!(prefix(&decor), "# Line 1\n#\n# Line 2\n");
    }

    #[test]
    fn test_append_docs_after_existing_comment() {
        let mut decor = Decor::new("# existing\n", "");
        append_docs_as_toml_comments(&mut decor, "Added");

        assert_eq!(prefix(&decor), "# existing\n#\n# Added\n");
    }

    #[test]
    fn test_annotate_preset_table() {
        let mut doc = "domain = \"builds\"\nlimit = 5\nunknown = 1\n"
            .parse::<DocumentMut>()
            .unwrap();

        annotate_toml_table::<Preset>(doc.as_table_mut(), false).unwrap();
        let rendered = doc.to_string();

        assert!(rendered.contains("# Domain the preset queries"));
        assert!(rendered.contains("# Maximum number of results"));
        assert!(rendered.contains("unknown = 1"));
    }
}
