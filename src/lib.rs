#![warn(missing_docs)]
//! Biblioteca para extraer pagos de planillas escolares y generar las
//! sentencias `INSERT` correspondientes.

mod alta;
mod alumnos;
mod error;
mod fechas;
mod lote;
mod montos;
mod nombres;
mod planilla;
mod plantilla;
mod rango;
mod salida;
mod texto;
mod tipos;

pub use crate::alta::{GeneradorAlumnos, extraer_nombres};
pub use crate::alumnos::IndiceAlumnos;
pub use crate::error::MigracionError;
pub use crate::fechas::{extraer_fecha, fecha_de_respaldo, mes_desde_encabezado, mes_desde_nombre};
pub use crate::lote::{GeneradorPagos, OpcionesLote};
pub use crate::montos::parsear_monto;
pub use crate::nombres::parsear_nombre_completo;
pub use crate::planilla::{Planilla, PlanillaMemoria, PlanillaXlsx};
pub use crate::plantilla::Plantilla;
pub use crate::rango::{RangoNombres, columnas_de_pago, indice_de_columna, letra_de_columna};
pub use crate::salida::{escribir_sentencias, ruta_de_salida};
pub use crate::texto::{colapsar_espacios, corregir_acentos, normalizar_nombre, quitar_acentos};
pub use crate::tipos::*;
