//! Acceso a la planilla de pagos: valores de celda y comentarios.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use quick_xml::Reader as XmlReader;
use quick_xml::events::{BytesStart, Event};
use zip::read::ZipArchive;

use crate::error::MigracionError;
use crate::rango;
use crate::tipos::Celda;

/// Celdas con valor y comentario, direccionadas como en la planilla:
/// columna en base 0, fila en base 1.
pub trait Planilla {
    /// Valor de la celda; las celdas fuera de la hoja son vacías.
    fn valor(&self, columna: u32, fila: u32) -> Celda;
    /// Texto del comentario adjunto a la celda, si existe.
    fn comentario(&self, columna: u32, fila: u32) -> Option<&str>;
}

/// Primera hoja de un libro XLSX, con sus comentarios.
#[derive(Debug, Clone)]
pub struct PlanillaXlsx {
    rango: Range<Data>,
    comentarios: HashMap<(u32, u32), String>,
}

impl PlanillaXlsx {
    /// Abre la primera hoja del libro y levanta sus comentarios.
    pub fn abrir<P: AsRef<Path>>(ruta: P) -> Result<Self, MigracionError> {
        let mut libro = open_workbook_auto(&ruta)?;
        let rango = libro
            .worksheet_range_at(0)
            .ok_or(MigracionError::HojaFaltante)??;
        let comentarios = comentarios_del_libro(&ruta)?;
        Ok(Self { rango, comentarios })
    }
}

impl Planilla for PlanillaXlsx {
    fn valor(&self, columna: u32, fila: u32) -> Celda {
        match self.rango.get_value((fila.saturating_sub(1), columna)) {
            None | Some(Data::Empty | Data::Error(_)) => Celda::Vacia,
            Some(Data::Float(valor)) => Celda::Numero(*valor),
            Some(Data::Int(valor)) => Celda::Numero(*valor as f64),
            Some(Data::DateTime(valor)) => Celda::Numero(valor.as_f64()),
            Some(Data::String(texto) | Data::DateTimeIso(texto) | Data::DurationIso(texto)) => {
                Celda::Texto(texto.clone())
            }
            Some(Data::Bool(valor)) => Celda::Texto(valor.to_string()),
        }
    }

    fn comentario(&self, columna: u32, fila: u32) -> Option<&str> {
        self.comentarios
            .get(&(columna, fila))
            .map(String::as_str)
    }
}

/// Comentarios de todas las partes `xl/comments*.xml` del libro.
///
/// calamine no expone los comentarios de celda, así que se leen directo del
/// contenedor ZIP. Los libros de pagos traen una sola hoja, de modo que
/// juntar todas las partes por referencia de celda es suficiente.
fn comentarios_del_libro<P: AsRef<Path>>(
    ruta: P,
) -> Result<HashMap<(u32, u32), String>, MigracionError> {
    let mut comentarios = HashMap::new();
    let archivo = File::open(&ruta)?;
    let mut zip = ZipArchive::new(BufReader::new(archivo))?;
    let partes: Vec<String> = zip
        .file_names()
        .filter(|nombre| nombre.starts_with("xl/comments") && nombre.ends_with(".xml"))
        .map(ToString::to_string)
        .collect();
    for parte in partes {
        let mut xml = String::new();
        zip.by_name(&parte)?.read_to_string(&mut xml)?;
        leer_parte_comentarios(&xml, &mut comentarios)?;
    }
    Ok(comentarios)
}

/// Junta el texto de cada `<comment ref="...">` de una parte de comentarios.
fn leer_parte_comentarios(
    xml: &str,
    comentarios: &mut HashMap<(u32, u32), String>,
) -> Result<(), MigracionError> {
    let mut lector = XmlReader::from_str(xml);
    let mut celda_actual: Option<(u32, u32)> = None;
    let mut texto = String::new();
    let mut dentro_de_t = false;
    loop {
        match lector.read_event()? {
            Event::Start(evento) if evento.local_name().as_ref() == b"comment" => {
                celda_actual = atributo_ref(&evento)?;
                texto.clear();
            }
            Event::Start(evento) if evento.local_name().as_ref() == b"t" => dentro_de_t = true,
            Event::End(evento) if evento.local_name().as_ref() == b"t" => dentro_de_t = false,
            Event::Text(evento) if dentro_de_t => texto.push_str(&evento.unescape()?),
            Event::End(evento) if evento.local_name().as_ref() == b"comment" => {
                if let Some(celda) = celda_actual.take() {
                    comentarios.insert(celda, texto.clone());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

/// Coordenadas del atributo `ref` de un `<comment>`.
fn atributo_ref(evento: &BytesStart) -> Result<Option<(u32, u32)>, MigracionError> {
    for atributo in evento.attributes() {
        let atributo = atributo.map_err(quick_xml::Error::from)?;
        if atributo.key.local_name().as_ref() == b"ref" {
            let valor = String::from_utf8_lossy(&atributo.value);
            return Ok(rango::referencia(&valor));
        }
    }
    Ok(None)
}

/// Planilla armada en memoria, para pruebas y datos preparados a mano.
#[derive(Debug, Clone, Default)]
pub struct PlanillaMemoria {
    celdas: HashMap<(u32, u32), Celda>,
    comentarios: HashMap<(u32, u32), String>,
}

impl PlanillaMemoria {
    /// Planilla vacía.
    #[inline]
    #[must_use]
    pub fn nueva() -> Self {
        Self::default()
    }

    /// Fija el valor de una celda por referencia (`"B3"`).
    ///
    /// # Panics
    ///
    /// Si la referencia no tiene la forma `<col><fila>`.
    #[must_use]
    pub fn con_valor(mut self, celda: &str, valor: Celda) -> Self {
        let coordenada = rango::referencia(celda).expect("valid cell reference");
        self.celdas.insert(coordenada, valor);
        self
    }

    /// Adjunta un comentario a una celda por referencia.
    ///
    /// # Panics
    ///
    /// Si la referencia no tiene la forma `<col><fila>`.
    #[must_use]
    pub fn con_comentario(mut self, celda: &str, texto: &str) -> Self {
        let coordenada = rango::referencia(celda).expect("valid cell reference");
        self.comentarios.insert(coordenada, texto.to_string());
        self
    }
}

impl Planilla for PlanillaMemoria {
    fn valor(&self, columna: u32, fila: u32) -> Celda {
        self.celdas.get(&(columna, fila)).cloned().unwrap_or_default()
    }

    fn comentario(&self, columna: u32, fila: u32) -> Option<&str> {
        self.comentarios
            .get(&(columna, fila))
            .map(String::as_str)
    }
}
