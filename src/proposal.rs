use kiwa_core::DirectoryEntry;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Year the source document was written for; rewritten by [`Proposal::patch_year`].
const SOURCE_YEAR: &str = "2025";

/// The proposal document.
///
/// The typed fields are a read view over the parts the viewer uses. The
/// document itself is kept as loaded and is what gets serialized, so
/// unknown keys, missing fields and `null`s survive an export. Edits to the
/// typed fields are not written back; [`Proposal::patch_year`] updates both.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub meta: Meta,
    pub aplicativos: Vec<DirectoryEntry>,
    pub artes: Vec<ArtDiscipline>,
    pub anexos: Annexes,
    pub evidencias: Evidence,
    document: Value,
}

#[derive(Debug, Default, Deserialize)]
struct Fields {
    #[serde(default)]
    meta: Meta,
    #[serde(default)]
    aplicativos: Vec<DirectoryEntry>,
    #[serde(default)]
    artes: Vec<ArtDiscipline>,
    #[serde(default)]
    anexos: Annexes,
    #[serde(default)]
    evidencias: Evidence,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub subtitulo: String,
    #[serde(default)]
    pub periodo: Option<Period>,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub centros: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Period {
    #[serde(default)]
    pub inicio: String,
    #[serde(default)]
    pub fin: String,
    /// Number or free text in the source documents.
    #[serde(default)]
    pub meses: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Annexes {
    #[serde(default)]
    pub tsv_horario_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtDiscipline {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub proposito: String,
    #[serde(default)]
    pub ejes: Vec<String>,
    #[serde(default)]
    pub metodologias_participacion: Vec<String>,
    #[serde(default)]
    pub productos_evidencias: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub videos: Vec<VideoLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VideoLink {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub url: String,
}

impl Default for Proposal {
    fn default() -> Self {
        Self {
            meta: Meta::default(),
            aplicativos: Vec::new(),
            artes: Vec::new(),
            anexos: Annexes::default(),
            evidencias: Evidence::default(),
            document: Value::Object(Map::new()),
        }
    }
}

impl TryFrom<Value> for Proposal {
    type Error = serde_json::Error;

    fn try_from(document: Value) -> Result<Self, Self::Error> {
        let f = Fields::deserialize(&document)?;
        Ok(Self {
            meta: f.meta,
            aplicativos: f.aplicativos,
            artes: f.artes,
            anexos: f.anexos,
            evidencias: f.evidencias,
            document,
        })
    }
}

impl<'de> Deserialize<'de> for Proposal {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Proposal::try_from(Value::deserialize(d)?).map_err(D::Error::custom)
    }
}

impl Serialize for Proposal {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(s)
    }
}

impl Proposal {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// The document as loaded (plus the year patch).
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Rewrite every `2025` in the period bounds, title and subtitle.
    pub fn patch_year(&mut self, year: u32) {
        let year = year.to_string();
        let meta = &mut self.meta;
        let Some(periodo) = meta.periodo.as_mut() else {
            return;
        };
        periodo.inicio = periodo.inicio.replace(SOURCE_YEAR, &year);
        periodo.fin = periodo.fin.replace(SOURCE_YEAR, &year);
        meta.titulo = meta.titulo.replace(SOURCE_YEAR, &year);
        meta.subtitulo = meta.subtitulo.replace(SOURCE_YEAR, &year);

        for path in [
            "/meta/periodo/inicio",
            "/meta/periodo/fin",
            "/meta/titulo",
            "/meta/subtitulo",
        ] {
            // only strings that are there; nothing is added
            if let Some(Value::String(s)) = self.document.pointer_mut(path) {
                *s = s.replace(SOURCE_YEAR, &year);
            }
        }
    }

    /// Annex location from the document, if set.
    pub fn tsv_url(&self) -> Option<&str> {
        self.anexos
            .tsv_horario_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
    }

    pub fn evidence_videos(&self) -> &[VideoLink] {
        &self.evidencias.videos
    }
}
