//! Separación de un nombre completo en apellidos y nombres.

use crate::texto::{colapsar_espacios, corregir_acentos};
use crate::tipos::NombreAlumno;

/// Título de la columna de nombres; marca una fila de encabezado, no de datos.
const ENCABEZADO_NOMBRES: &str = "Nombre del Alumno";

/// Separa un nombre completo en hasta dos apellidos y tres nombres.
///
/// Devuelve `None` solo cuando el valor es el título de la columna. Con coma,
/// la parte antes de la primera coma aporta los apellidos y el resto los
/// nombres; sin coma, las dos primeras palabras se toman como apellidos y las
/// siguientes como nombres. Un nombre de una sola palabra no alcanza para
/// asignar campos y deja el registro vacío; las palabras más allá de la
/// quinta se descartan.
pub fn parsear_nombre_completo(crudo: &str) -> Option<NombreAlumno> {
    if crudo.trim() == ENCABEZADO_NOMBRES {
        return None;
    }

    let limpio = colapsar_espacios(&corregir_acentos(crudo));
    let mut nombre = NombreAlumno::default();

    if let Some((apellidos, nombres)) = limpio.split_once(',') {
        let apellidos: Vec<&str> = apellidos.split_whitespace().collect();
        let nombres: Vec<&str> = nombres.split_whitespace().collect();
        nombre.primer_apellido = palabra(&apellidos, 0);
        nombre.segundo_apellido = palabra(&apellidos, 1);
        nombre.primer_nombre = palabra(&nombres, 0);
        nombre.segundo_nombre = palabra(&nombres, 1);
        nombre.tercer_nombre = palabra(&nombres, 2);
    } else {
        let palabras: Vec<&str> = limpio.split_whitespace().collect();
        if palabras.len() >= 2 {
            nombre.primer_apellido = palabras[0].to_string();
            nombre.segundo_apellido = palabras[1].to_string();
            nombre.primer_nombre = palabra(&palabras, 2);
            nombre.segundo_nombre = palabra(&palabras, 3);
            nombre.tercer_nombre = palabra(&palabras, 4);
        }
    }

    Some(nombre)
}

/// Palabra en la posición pedida, o cadena vacía si no existe.
fn palabra(palabras: &[&str], indice: usize) -> String {
    palabras.get(indice).map_or_else(String::new, ToString::to_string)
}
