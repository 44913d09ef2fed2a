use kiwa_core::{filter_rows, normalize, Table};

const HORARIO: &str = "Centro\tDía\tHora\tÁrea\tDocente\r\n\
Kiwa Bosa\tLunes\t2:00 p. m.\tMúsica\tAndrés\r\n\
Kiwa Suba\tMartes\t3:00 p. m.\tDanza\tCamila\r\n\
\r\n\
Kiwa Usme\tMiércoles\t2:30 p. m.\tArtes plásticas\r\n\
Kiwa Bosa\tJueves\t4:00 p. m.\tTeatro\tJosé\tsuplente\r\n";

#[test]
fn schedule_annex_end_to_end() {
    let table = Table::parse(HORARIO);
    assert_eq!(table.headers, vec!["Centro", "Día", "Hora", "Área", "Docente"]);
    assert_eq!(table.len(), 4);

    // ragged rows survive parsing untouched
    assert_eq!(table.rows[2].len(), 4);
    assert_eq!(table.rows[3].len(), 6);
    assert_eq!(table.ragged_rows(), vec![2, 3]);

    let hits = filter_rows(&table, "artes plasticas");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].get(0), Some("Kiwa Usme"));

    let hits = filter_rows(&table, "JOSE");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].get(5), Some("suplente"));

    let bosa: Vec<_> = filter_rows(&table, "bosa")
        .into_iter()
        .map(|r| r.get(1).unwrap_or_default())
        .collect();
    assert_eq!(bosa, vec!["Lunes", "Jueves"]);
}

#[test]
fn display_values_are_not_normalized() {
    let table = Table::parse(HORARIO);
    let hits = filter_rows(&table, "musica");
    assert_eq!(hits[0].get(3), Some("Música"));
}

#[test]
fn normalize_invariances() {
    let samples = ["café", "Educación Artística", "  ÑOÑO", "plain", ""];
    for s in samples {
        let n = normalize(s);
        assert_eq!(n, normalize(&format!("{s}   ")));
        assert_eq!(n, normalize(&s.to_uppercase()));
        assert_eq!(n, normalize(&n));
    }
    assert_eq!(normalize("café"), normalize("cafe"));
}
