//! Normalización de texto para cotejar nombres entre planilla y CSV.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Colapsa grupos de caracteres de espacio en uno solo y recorta extremos.
pub fn colapsar_espacios(texto: &str) -> String {
    let mut salida = String::with_capacity(texto.len());
    let mut previo_espacio = false;
    for ch in texto.chars() {
        let es_espacio = ch.is_whitespace();
        if es_espacio {
            if !previo_espacio {
                salida.push(' ');
            }
        } else {
            salida.push(ch);
        }
        previo_espacio = es_espacio;
    }
    salida.trim().to_string()
}

/// Quita tildes y diacríticos: descompone a NFD y descarta las marcas combinantes.
pub fn quitar_acentos(texto: &str) -> String {
    texto.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
}

/// Corrige vocales con acento grave capturadas mal en la planilla.
///
/// Es una reparación puntual de datos, no una transliteración general:
/// solo las cinco vocales, en ambas cajas.
pub fn corregir_acentos(texto: &str) -> String {
    texto
        .chars()
        .map(|ch| match ch {
            'à' => 'á',
            'è' => 'é',
            'ì' => 'í',
            'ò' => 'ó',
            'ù' => 'ú',
            'À' => 'Á',
            'È' => 'É',
            'Ì' => 'Í',
            'Ò' => 'Ó',
            'Ù' => 'Ú',
            otro => otro,
        })
        .collect()
}

/// Llave de cotejo de un nombre: mayúsculas, sin acentos, sin `.` ni `,`,
/// con espacios colapsados.
pub fn normalizar_nombre(nombre: &str) -> String {
    let mayusculas = nombre.trim().to_uppercase();
    let sin_acentos = quitar_acentos(&mayusculas);
    let sin_puntuacion: String = sin_acentos
        .chars()
        .filter(|ch| !matches!(ch, '.' | ','))
        .collect();
    colapsar_espacios(&sin_puntuacion)
}
