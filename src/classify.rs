//! Keyword rule tables that pick a category (and its icon) for launcher
//! tiles and art cards. First matching rule wins.

use kiwa_core::{normalize, DirectoryEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppCategory {
    Attendance,
    Incident,
    Calendar,
    Report,
    Finance,
    Files,
    Chat,
    Teacher,
    Student,
    Dashboard,
    Other,
}

impl AppCategory {
    pub fn icon(self) -> &'static str {
        match self {
            AppCategory::Attendance => "✅",
            AppCategory::Incident => "⚠️",
            AppCategory::Calendar => "🗓️",
            AppCategory::Report => "📝",
            AppCategory::Finance => "💰",
            AppCategory::Files => "📎",
            AppCategory::Chat => "💬",
            AppCategory::Teacher => "👩‍🏫",
            AppCategory::Student => "🧒",
            AppCategory::Dashboard => "📊",
            AppCategory::Other => "🧩",
        }
    }
}

/// Needles are matched against normalized text, so they are written
/// without accents.
const APP_RULES: &[(&[&str], AppCategory)] = &[
    (&["asistencia"], AppCategory::Attendance),
    (&["novedad", "incidente"], AppCategory::Incident),
    (&["calendario"], AppCategory::Calendar),
    (&["informe", "reporte"], AppCategory::Report),
    (&["finanza", "pago", "nomina"], AppCategory::Finance),
    (&["drive", "carpeta", "evidencia"], AppCategory::Files),
    (&["whatsapp", "chat"], AppCategory::Chat),
    (&["docente", "prof"], AppCategory::Teacher),
    (&["estudiante", "nna"], AppCategory::Student),
    (&["dashboard"], AppCategory::Dashboard),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtCategory {
    Dance,
    Theatre,
    Visual,
    Music,
    Other,
}

impl ArtCategory {
    pub fn icon(self) -> &'static str {
        match self {
            ArtCategory::Dance => "💃",
            ArtCategory::Theatre => "🎭",
            ArtCategory::Visual => "🎨",
            ArtCategory::Music => "🎵",
            ArtCategory::Other => "✨",
        }
    }
}

const ART_RULES: &[(&[&str], ArtCategory)] = &[
    (&["danza"], ArtCategory::Dance),
    (&["teatro"], ArtCategory::Theatre),
    (&["dibujo", "arte", "visual"], ArtCategory::Visual),
    (&["musica"], ArtCategory::Music),
];

fn first_match<C: Copy>(text: &str, rules: &[(&[&str], C)], fallback: C) -> C {
    let n = normalize(text);
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|k| n.contains(k)))
        .map(|(_, c)| *c)
        .unwrap_or(fallback)
}

pub fn classify_app_text(text: &str) -> AppCategory {
    first_match(text, APP_RULES, AppCategory::Other)
}

/// Looks at section, kind and name (in that order of concatenation).
pub fn classify_app(entry: &DirectoryEntry) -> AppCategory {
    let blob = [
        entry.section.as_str(),
        entry.kind.as_str(),
        entry.name.as_str(),
    ]
    .join(" ");
    classify_app_text(&blob)
}

pub fn classify_art(name: &str) -> ArtCategory {
    first_match(name, ART_RULES, ArtCategory::Other)
}
