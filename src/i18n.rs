// ==========================================
// Módulo de internacionalización (i18n)
// ==========================================
// Usa la biblioteca rust-i18n
// Español (por omisión) e inglés
// ==========================================
// Nota: la macro rust_i18n::i18n! se inicializa en lib.rs
// ==========================================

/// Devuelve el idioma actual
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Cambia el idioma
///
/// # Parámetros
/// - locale: código de idioma ("es-MX" o "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Traduce un mensaje (sin parámetros)
///
/// # Ejemplo
/// ```no_run
/// use bi_educativo::i18n::t;
/// let msg = t("common.exito");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Traduce un mensaje (con parámetros)
///
/// # Ejemplo
/// ```no_run
/// use bi_educativo::i18n::t_with_args;
/// let msg = t_with_args("import.archivo_no_encontrado", &[("path", "/tmp/datos.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut resultado = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let marcador = format!("%{{{}}}", k);
        resultado = resultado.replace(&marcador, v);
    }
    resultado
}
