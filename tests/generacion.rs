use chrono::NaiveDate;
use pagos_sql::{
    Celda, FechaPago, GeneradorAlumnos, GeneradorPagos, IndiceAlumnos, ModoColegiatura,
    OpcionesLote, Pago, Plantilla, PlanillaMemoria, parsear_nombre_completo,
};

fn ruta_de_fixture(nombre: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(nombre)
}

fn cargar_plantilla() -> Plantilla {
    Plantilla::desde_archivo(ruta_de_fixture("insert-pago-example.sql")).expect("plantilla fixture")
}

fn cargar_indice() -> IndiceAlumnos {
    IndiceAlumnos::desde_csv(ruta_de_fixture("alumnos.csv")).expect("csv fixture")
}

fn pago_de_prueba() -> Pago {
    Pago {
        alumno_id: 321,
        monto: "1234.56".parse().expect("monto"),
        fecha: FechaPago::Iso(NaiveDate::from_ymd_opt(2024, 11, 13).expect("fecha")),
        rubro_id: 9,
        mes: None,
        anio: None,
        es_colegiatura: false,
        notas: "Pagó en efectivo".to_string(),
    }
}

/// Línea de la sentencia que lleva el comentario ancla dado, sin sangría.
fn linea_con<'a>(sql: &'a str, marcador: &str) -> &'a str {
    sql.lines()
        .find(|linea| linea.contains(marcador))
        .unwrap_or_else(|| panic!("no hay línea con '{marcador}'"))
        .trim_start()
}

#[test]
fn la_plantilla_descarta_el_comentario_inicial() {
    let plantilla = cargar_plantilla();
    assert!(plantilla.texto().starts_with("INSERT INTO"));
}

#[test]
fn la_plantilla_sin_un_ancla_falla_al_cargar() {
    let texto = std::fs::read_to_string(ruta_de_fixture("insert-pago-example.sql")).unwrap();
    let sin_rubro = texto.replace("-- RubroId", "-- Rubro");
    let error = Plantilla::cargar(&sin_rubro).unwrap_err();
    assert!(error.to_string().contains("RubroId"));

    let error = Plantilla::cargar("-- solo comentarios\n").unwrap_err();
    assert!(error.to_string().contains("INSERT INTO"));
}

#[test]
fn renderizar_sustituye_solo_los_campos_anclados() {
    let plantilla = cargar_plantilla();
    let sql = plantilla.renderizar(&pago_de_prueba());

    assert!(linea_con(&sql, "-- Fecha").starts_with("'2024-11-13',"));
    assert!(linea_con(&sql, "-- Monto").starts_with("1234.56,"));
    assert!(linea_con(&sql, "-- MedioPago").starts_with("1,"));
    assert!(linea_con(&sql, "-- Notas").starts_with("'Pagó en efectivo',"));
    assert!(linea_con(&sql, "-- AlumnoId").starts_with("321,"));
    assert!(linea_con(&sql, "-- RubroId").starts_with("9,"));
    assert!(linea_con(&sql, "-- EsColegiatura").starts_with("false,"));
    assert!(linea_con(&sql, "-- MesColegiatura").starts_with("NULL,"));
    assert!(linea_con(&sql, "-- AnioColegiatura").starts_with("NULL,"));

    // Lo no anclado queda intacto: ciclo escolar, usuario de creación y el
    // CURRENT_TIMESTAMP de FechaCreacion.
    assert!(linea_con(&sql, "-- CicloEscolar").starts_with("2025,"));
    assert!(linea_con(&sql, "-- UsuarioCreacionId").starts_with("1);"));
    assert!(linea_con(&sql, "-- FechaCreacion").starts_with("CURRENT_TIMESTAMP,"));
    assert_eq!(sql.matches("CURRENT_TIMESTAMP").count(), 1);
}

#[test]
fn renderizar_es_deterministico() {
    let plantilla = cargar_plantilla();
    let pago = pago_de_prueba();
    assert_eq!(plantilla.renderizar(&pago), plantilla.renderizar(&pago));
}

#[test]
fn renderizar_escapa_comillas_en_las_notas() {
    let plantilla = cargar_plantilla();
    let mut pago = pago_de_prueba();
    pago.notas = "traslado a cuenta d'ahorro".to_string();
    let sql = plantilla.renderizar(&pago);
    assert!(sql.contains("'traslado a cuenta d''ahorro',"));
}

#[test]
fn renderizar_conserva_la_fecha_cruda() {
    let plantilla = cargar_plantilla();
    let mut pago = pago_de_prueba();
    pago.fecha = FechaPago::Cruda("05 BRUMARIO 2024".to_string());
    assert!(plantilla.renderizar(&pago).contains("'05 BRUMARIO 2024',"));
}

#[test]
fn el_indice_conserva_la_ultima_fila_ante_nombres_repetidos() {
    let indice = cargar_indice();
    assert_eq!(indice.len(), 3);
    assert_eq!(indice.buscar("RAMIREZ GOMEZ ANA LUCIA"), Some(157));
}

#[test]
fn lote_de_inscripciones_en_orden_de_filas() {
    // Columna de pagos derivada de B por el desplazamiento B -> I.
    let planilla = PlanillaMemoria::nueva()
        .con_valor("B3", Celda::Texto("García López, Juan Carlos".into()))
        .con_valor("I3", Celda::Texto("Q275,50".into()))
        .con_comentario("I3", "Pagó el 13 Noviembre 2024")
        .con_valor("B4", Celda::Texto("Alumno Desconocido, Nadie".into()))
        .con_valor("I4", Celda::Texto("300".into()))
        .con_valor("B5", Celda::Texto("Pérez Morales, María José".into()))
        .con_valor("I5", Celda::Numero(300.0))
        .con_comentario("I5", "depósito 15/03/2024");
    let indice = cargar_indice();
    let plantilla = cargar_plantilla();
    let opciones = OpcionesLote::nuevas("B3:B5", None, 8).expect("opciones");

    let sentencias = GeneradorPagos::nuevo(&planilla, &indice, &plantilla, opciones).generar();

    assert_eq!(sentencias.len(), 2);
    assert!(linea_con(&sentencias[0], "-- AlumnoId").starts_with("154,"));
    assert!(linea_con(&sentencias[0], "-- Monto").starts_with("275.50,"));
    assert!(linea_con(&sentencias[0], "-- Fecha").starts_with("'2024-11-13',"));
    assert!(linea_con(&sentencias[0], "-- Notas").starts_with("'Pagó el 13 Noviembre 2024',"));
    assert!(linea_con(&sentencias[1], "-- AlumnoId").starts_with("155,"));
    assert!(linea_con(&sentencias[1], "-- Monto").starts_with("300.00,"));
    assert!(linea_con(&sentencias[1], "-- Fecha").starts_with("'2024-03-15',"));
}

#[test]
fn lote_sin_fecha_usa_el_respaldo() {
    let planilla = PlanillaMemoria::nueva()
        .con_valor("B3", Celda::Texto("GARCIA LOPEZ JUAN CARLOS".into()))
        .con_valor("I3", Celda::Numero(175.5));
    let indice = cargar_indice();
    let plantilla = cargar_plantilla();
    let opciones = OpcionesLote::nuevas("B3", None, 8)
        .expect("opciones")
        .respaldo_fecha(9, 2025);

    let sentencias = GeneradorPagos::nuevo(&planilla, &indice, &plantilla, opciones).generar();

    assert_eq!(sentencias.len(), 1);
    assert!(linea_con(&sentencias[0], "-- Fecha").starts_with("'2025-09-01',"));
    assert!(linea_con(&sentencias[0], "-- Monto").starts_with("175.50,"));
}

#[test]
fn lote_sin_fecha_ni_respaldo_descarta_la_fila() {
    let planilla = PlanillaMemoria::nueva()
        .con_valor("B3", Celda::Texto("GARCIA LOPEZ JUAN CARLOS".into()))
        .con_valor("I3", Celda::Numero(175.5));
    let indice = cargar_indice();
    let plantilla = cargar_plantilla();
    let opciones = OpcionesLote::nuevas("B3", None, 8).expect("opciones");

    let sentencias = GeneradorPagos::nuevo(&planilla, &indice, &plantilla, opciones).generar();
    assert!(sentencias.is_empty());
}

#[test]
fn colegiaturas_toman_el_mes_del_encabezado() {
    let planilla = PlanillaMemoria::nueva()
        .con_valor("J2", Celda::Texto("Abril".into()))
        .con_valor("K2", Celda::Texto("Mayo".into()))
        .con_valor("L2", Celda::Texto("Junio".into()))
        .con_valor("B3", Celda::Texto("GARCIA LOPEZ JUAN CARLOS".into()))
        .con_valor("J3", Celda::Texto("Q425,00".into()))
        .con_comentario("J3", "pagado el 02/04/2025")
        .con_valor("K3", Celda::Numero(425.0));
    let indice = cargar_indice();
    let plantilla = cargar_plantilla();
    let opciones = OpcionesLote::nuevas("B3", Some("J-L"), 8)
        .expect("opciones")
        .respaldo_fecha(5, 2025)
        .modo_colegiatura(ModoColegiatura::PorEncabezado {
            fila_encabezado: 2,
            anio: 2025,
        });

    let sentencias = GeneradorPagos::nuevo(&planilla, &indice, &plantilla, opciones).generar();

    // Dos pagos: abril y mayo; la columna de junio está vacía.
    assert_eq!(sentencias.len(), 2);
    assert!(linea_con(&sentencias[0], "-- MesColegiatura").starts_with("4,"));
    assert!(linea_con(&sentencias[0], "-- Fecha").starts_with("'2025-04-02',"));
    assert!(linea_con(&sentencias[1], "-- MesColegiatura").starts_with("5,"));
    assert!(linea_con(&sentencias[1], "-- Fecha").starts_with("'2025-05-01',"));
    for sentencia in &sentencias {
        assert!(linea_con(sentencia, "-- EsColegiatura").starts_with("true,"));
        assert!(linea_con(sentencia, "-- AnioColegiatura").starts_with("2025,"));
    }
}

#[test]
fn alta_de_alumnos_con_campos_opcionales_en_null() {
    let nombre = parsear_nombre_completo("GARCIA LOPEZ, JUAN").expect("nombre");
    let generador = GeneradorAlumnos::nuevo(4, "B");
    let sql = generador.renderizar_con_fecha(&nombre, "2025-08-07T10:00:00-06:00");

    assert!(sql.starts_with("INSERT INTO public.\"Alumnos\"("));
    assert!(sql.contains("VALUES ('JUAN'\n"));
    assert!(sql.contains("'GARCIA'"));
    assert!(sql.contains("'LOPEZ'"));
    assert!(sql.contains("'2025-08-07T10:00:00-06:00'"));
    assert!(sql.contains("'B'"));
    // Segundo nombre y tercer nombre ausentes: NULL, nunca comillas vacías.
    assert!(!sql.contains("''"));
    assert!(sql.trim_end().ends_with(", NULL\n\t);"));
}

#[test]
fn alta_de_alumnos_escapa_comillas_simples() {
    let nombre = parsear_nombre_completo("D'Aubuisson Paz, Renata").expect("nombre");
    let generador = GeneradorAlumnos::nuevo(4, "A");
    let sql = generador.renderizar_con_fecha(&nombre, "2025-08-07T10:00:00-06:00");
    assert!(sql.contains("'D''Aubuisson'"));
}
