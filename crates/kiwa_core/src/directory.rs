use serde::{Deserialize, Deserializer, Serialize};

use crate::search::SearchSurface;

/// Group label for entries without a section.
pub const DEFAULT_SECTION: &str = "Otros";
/// Kind label shown for entries without a kind.
pub const DEFAULT_KIND: &str = "Link";
/// Description shown for entries without one.
pub const DEFAULT_DESCRIPTION: &str = "Acceso rápido al aplicativo.";

/// One tool in the apps launcher.
///
/// Field names follow the proposal document (`nombre`, `tipo`, ...); the
/// English names are accepted too. Missing or `null` fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    #[serde(rename = "nombre", alias = "name", default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub link: String,
    #[serde(rename = "tipo", alias = "kind", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(rename = "seccion", alias = "section", default, deserialize_with = "nullable")]
    pub section: String,
    #[serde(
        rename = "descripcion",
        alias = "description",
        default,
        deserialize_with = "nullable"
    )]
    pub description: String,
}

impl DirectoryEntry {
    /// Facet key: the section, or [`DEFAULT_SECTION`] when blank.
    pub fn section_or_default(&self) -> &str {
        non_blank(&self.section).unwrap_or(DEFAULT_SECTION)
    }

    pub fn kind_or_default(&self) -> &str {
        non_blank(&self.kind).unwrap_or(DEFAULT_KIND)
    }

    pub fn description_or_default(&self) -> &str {
        non_blank(&self.description).unwrap_or(DEFAULT_DESCRIPTION)
    }
}

impl SearchSurface for DirectoryEntry {
    /// Name, link, kind and raw section separated by spaces. The
    /// description is not searched.
    fn search_surface(&self) -> String {
        [
            self.name.as_str(),
            self.link.as_str(),
            self.kind.as_str(),
            self.section.as_str(),
        ]
        .join(" ")
    }
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn nullable<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_spanish_keys_and_nulls() {
        let e: DirectoryEntry = serde_json::from_value(json!({
            "nombre": "Asistencia NNA",
            "link": "https://example.org/a",
            "tipo": null,
            "seccion": "Seguimiento"
        }))
        .unwrap();
        assert_eq!(e.name, "Asistencia NNA");
        assert_eq!(e.kind, "");
        assert_eq!(e.section, "Seguimiento");
        assert_eq!(e.description, "");
        assert_eq!(e.kind_or_default(), DEFAULT_KIND);
        assert_eq!(e.description_or_default(), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn english_aliases() {
        let e: DirectoryEntry =
            serde_json::from_value(json!({"name": "Drive", "section": "Evidencias"})).unwrap();
        assert_eq!(e.name, "Drive");
        assert_eq!(e.section_or_default(), "Evidencias");
    }

    #[test]
    fn blank_section_falls_back() {
        let mut e = DirectoryEntry::default();
        assert_eq!(e.section_or_default(), DEFAULT_SECTION);
        e.section = "   ".into();
        assert_eq!(e.section_or_default(), DEFAULT_SECTION);
    }

    #[test]
    fn surface_skips_description() {
        let e = DirectoryEntry {
            name: "Calendario".into(),
            link: "https://cal".into(),
            kind: "App".into(),
            section: "".into(),
            description: "muestras".into(),
        };
        assert_eq!(e.search_surface(), "Calendario https://cal App ");
    }
}
