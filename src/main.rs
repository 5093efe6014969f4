//! CLI: genera sentencias `INSERT` de pagos o de alta de alumnos.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;

use pagos_sql::{
    GeneradorAlumnos, GeneradorPagos, IndiceAlumnos, ModoColegiatura, OpcionesLote, Plantilla,
    PlanillaXlsx, PoliticaMontos, RangoNombres, escribir_sentencias, extraer_nombres,
    parsear_nombre_completo, ruta_de_salida,
};

#[derive(Parser)]
#[command(
    name = "pagos-sql",
    version,
    about = "Genera sentencias INSERT a partir de planillas de pagos escolares"
)]
struct Cli {
    #[command(subcommand)]
    comando: Comando,
}

#[derive(Subcommand)]
enum Comando {
    /// Pagos de un libro XLSX cotejados contra el CSV de alumnos.
    Pagos(ArgsPagos),
    /// Altas de alumnos desde la columna de nombres de un libro XLSX.
    Alumnos(ArgsAlumnos),
}

#[derive(Args)]
struct ArgsPagos {
    /// Libro de pagos (xlsx).
    #[arg(long)]
    excel: PathBuf,
    /// CSV de referencia con columnas Id y NombreCompleto.
    #[arg(long)]
    csv: PathBuf,
    /// Plantilla con la sentencia INSERT de ejemplo.
    #[arg(long, default_value = "insert-pago-example.sql")]
    plantilla: PathBuf,
    /// RubroId para todas las sentencias.
    #[arg(long, default_value_t = 8)]
    rubro_id: i32,
    /// Rango de las celdas de nombres, p. ej. B3:B21.
    #[arg(long, default_value = "B3:B21")]
    rango: String,
    /// Columnas de pago (J, J-L o J:L); sin esto se deriva de la de nombres.
    #[arg(long)]
    columnas: Option<String>,
    /// Mes de respaldo (1-12) cuando el comentario no trae fecha.
    #[arg(long)]
    mes: Option<u32>,
    /// Año de respaldo cuando el comentario no trae fecha.
    #[arg(long)]
    anio: Option<i32>,
    /// Acepta cualquier valor numérico como monto, sin validar tokens ni signo.
    #[arg(long)]
    montos_permisivos: bool,
    /// Trata el lote como colegiaturas de este año: el mes sale del
    /// encabezado de cada columna de pago.
    #[arg(long, value_name = "ANIO")]
    colegiatura: Option<i32>,
    /// Fila de los encabezados de mes (con --colegiatura).
    #[arg(long, default_value_t = 2)]
    fila_encabezado: u32,
}

#[derive(Args)]
struct ArgsAlumnos {
    /// Libro con la columna de nombres (xlsx).
    #[arg(long)]
    excel: PathBuf,
    /// Rango de las celdas de nombres, p. ej. B3:B21.
    #[arg(long, default_value = "B3:B21")]
    rango: String,
    /// GradoId al que se inscribe el lote.
    #[arg(long, default_value_t = 4)]
    grado_id: i32,
    /// Sección del lote.
    #[arg(long, default_value = "B")]
    seccion: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    match Cli::parse().comando {
        Comando::Pagos(args) => correr_pagos(&args),
        Comando::Alumnos(args) => correr_alumnos(&args),
    }
}

fn correr_pagos(args: &ArgsPagos) -> Result<(), Box<dyn std::error::Error>> {
    let indice = IndiceAlumnos::desde_csv(&args.csv)?;
    info!("{} alumnos en la tabla de referencia", indice.len());
    let planilla = PlanillaXlsx::abrir(&args.excel)?;
    let plantilla = Plantilla::desde_archivo(&args.plantilla)?;

    let mut opciones = OpcionesLote::nuevas(&args.rango, args.columnas.as_deref(), args.rubro_id)?;
    if args.montos_permisivos {
        opciones = opciones.politica_montos(PoliticaMontos::Permisiva);
    }
    if let (Some(mes), Some(anio)) = (args.mes, args.anio) {
        opciones = opciones.respaldo_fecha(mes, anio);
    }
    if let Some(anio) = args.colegiatura {
        opciones = opciones.modo_colegiatura(ModoColegiatura::PorEncabezado {
            fila_encabezado: args.fila_encabezado,
            anio,
        });
    }

    let sentencias = GeneradorPagos::nuevo(&planilla, &indice, &plantilla, opciones).generar();
    if sentencias.is_empty() {
        println!("No se generó ninguna sentencia.");
        return Ok(());
    }
    let ruta = ruta_de_salida(base_de(&args.excel));
    escribir_sentencias(&ruta, &sentencias)?;
    println!(
        "{} sentencias escritas en {}",
        sentencias.len(),
        ruta.display()
    );
    Ok(())
}

fn correr_alumnos(args: &ArgsAlumnos) -> Result<(), Box<dyn std::error::Error>> {
    let planilla = PlanillaXlsx::abrir(&args.excel)?;
    let rango = RangoNombres::parsear(&args.rango)?;
    let generador = GeneradorAlumnos::nuevo(args.grado_id, &args.seccion);

    let sentencias: Vec<String> = extraer_nombres(&planilla, &rango)
        .iter()
        .filter_map(|nombre| parsear_nombre_completo(nombre))
        .map(|nombre| generador.renderizar(&nombre).trim_end().to_string())
        .collect();
    if sentencias.is_empty() {
        println!("No se generó ninguna sentencia.");
        return Ok(());
    }
    let ruta = ruta_de_salida(&format!("altas-{}", base_de(&args.excel)));
    escribir_sentencias(&ruta, &sentencias)?;
    println!(
        "{} sentencias escritas en {}",
        sentencias.len(),
        ruta.display()
    );
    Ok(())
}

fn base_de(ruta: &std::path::Path) -> &str {
    ruta.file_stem().and_then(|s| s.to_str()).unwrap_or("salida")
}
