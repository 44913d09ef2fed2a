use kiwa_core::{
    directory_chips, facet_and_filter, filter_directory, DirectoryEntry, Facet, FilterState,
    SearchSurface, SectionCollator,
};
use serde_json::json;

fn apps() -> Vec<DirectoryEntry> {
    serde_json::from_value(json!([
        {"nombre": "Asistência Kiwa", "link": "https://app/asis", "tipo": "App", "seccion": "Seguimiento"},
        {"nombre": "Asistente de informes", "link": "https://app/inf", "tipo": "Form", "seccion": "Reportes"},
        {"nombre": "Carpeta de evidencias", "link": "https://drive/x", "tipo": "Drive", "seccion": "Água"},
        {"nombre": "Nómina", "link": "https://app/pago", "seccion": "Zeta"},
        {"nombre": "Chat líderes", "link": "https://wa/1", "tipo": "WhatsApp"},
        {"nombre": "Calendario", "link": "https://cal", "tipo": "App", "seccion": "Beta"}
    ]))
    .unwrap()
}

fn names<'a>(items: &[&'a DirectoryEntry]) -> Vec<&'a str> {
    items.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn all_facet_empty_query_groups_everything() {
    let apps = apps();
    let c = SectionCollator::new("es");
    let g = filter_directory(&apps, &FilterState::default(), &c);
    assert_eq!(g.total(), apps.len());
    assert_eq!(
        g.keys(),
        vec!["Água", "Beta", "Otros", "Reportes", "Seguimiento", "Zeta"]
    );
}

#[test]
fn asistencia_matches_accented_but_not_asistente() {
    let apps = apps();
    let c = SectionCollator::new("es");
    let g = filter_directory(&apps, &FilterState::new("asistencia", Facet::All), &c);
    assert_eq!(g.total(), 1);
    assert_eq!(names(g.get("Seguimiento").unwrap()), vec!["Asistência Kiwa"]);

    let g = filter_directory(&apps, &FilterState::new("asisten", Facet::All), &c);
    assert_eq!(g.total(), 2);
}

#[test]
fn query_searches_link_kind_and_section() {
    let apps = apps();
    let c = SectionCollator::new("es");
    let by_link = filter_directory(&apps, &FilterState::new("drive/x", Facet::All), &c);
    assert_eq!(by_link.total(), 1);
    let by_kind = filter_directory(&apps, &FilterState::new("whatsapp", Facet::All), &c);
    assert_eq!(by_kind.keys(), vec!["Otros"]);
    let by_section = filter_directory(&apps, &FilterState::new("agua", Facet::All), &c);
    assert_eq!(by_section.total(), 1);
}

#[test]
fn generic_engine_with_custom_projection() {
    let apps = apps();
    let c = SectionCollator::new("es");
    let g = facet_and_filter(
        &apps,
        &Facet::All,
        |e: &DirectoryEntry| e.kind.as_str(),
        "",
        |e: &DirectoryEntry| e.search_surface(),
        &c,
    );
    assert_eq!(g.keys(), vec!["App", "Drive", "Form", "Otros", "WhatsApp"]);
    assert_eq!(g.get("App").map(|v| v.len()), Some(2));
}

#[test]
fn chips_are_all_plus_sections() {
    let chips = directory_chips(&apps(), &SectionCollator::new("es"));
    assert_eq!(chips.first().map(String::as_str), Some("Todos"));
    assert_eq!(chips.len(), 7);
}
