// ==========================================
// Sistema BI Educativo - Normalizador de filas
// ==========================================
// Responsabilidad: columna con sinónimos → campo canónico tipado.
// Función pura de (fila cruda, listas de referencia) → fila
// normalizada; "ausente" se conserva como None, nunca se rellena
// con cero/falso. Las obligatoriedades las reporta el validador.
// ==========================================

use crate::domain::import::{
    DatosEducativosRow, EscuelaRow, MunicipioRow, RawRow, TipoEscuelaRow, UsuarioRow,
};
use crate::domain::CatalogoNombre;
use chrono::NaiveDate;
use serde_json::Value;

pub struct RowNormalizer;

impl RowNormalizer {
    pub fn normalize_municipio(&self, raw: &RawRow) -> MunicipioRow {
        MunicipioRow {
            nombre: self.texto(raw, &["nombre", "name", "municipio"]),
            row_index: raw.row_index,
        }
    }

    pub fn normalize_tipo_escuela(&self, raw: &RawRow) -> TipoEscuelaRow {
        TipoEscuelaRow {
            nombre: self.texto(raw, &["nombre", "name", "tipo"]),
            row_index: raw.row_index,
        }
    }

    /// Normaliza una escuela. El municipio y el tipo pueden llegar como id
    /// directo o como nombre humano; el nombre se resuelve contra las listas
    /// de referencia del llamador.
    pub fn normalize_escuela(
        &self,
        raw: &RawRow,
        municipios: &[CatalogoNombre],
        tipos: &[CatalogoNombre],
    ) -> EscuelaRow {
        let municipio_id = self
            .entero(raw, &["municipioId", "municipio_id"])
            .or_else(|| self.resolver_id(raw, &["municipio", "municipio_nombre"], municipios));
        let tipo_id = self
            .entero(raw, &["tipoId", "tipo_id"])
            .or_else(|| self.resolver_id(raw, &["tipo", "tipo_nombre"], tipos));

        EscuelaRow {
            nombre: self.texto(raw, &["nombre", "name"]),
            direccion: self.texto(raw, &["direccion", "address"]),
            telefono: self.texto(raw, &["telefono", "phone"]),
            fecha_fundacion: self.fecha(raw, &["fecha_fundacion", "fecha_Fundacion", "foundation_date"]),
            municipio_id,
            tipo_id,
            row_index: raw.row_index,
        }
    }

    /// Normaliza un registro de datos educativos. La escuela puede llegar
    /// como id directo o como nombre humano.
    pub fn normalize_datos(
        &self,
        raw: &RawRow,
        escuelas: &[CatalogoNombre],
    ) -> DatosEducativosRow {
        let escuela_id = self
            .entero(raw, &["escuelaId", "escuela_id"])
            .or_else(|| self.resolver_id(raw, &["escuela", "nombre_escuela", "school"], escuelas));

        DatosEducativosRow {
            escuela_id,
            anio: self.entero(raw, &["anio", "año", "year"]).map(|v| v as i32),
            semestre: self.texto(raw, &["semestre", "semester"]),
            cantidad_alumnos: self
                .entero(raw, &["cantidad_alumnos", "cantidadAlumnos", "alumnos", "students"])
                .map(|v| v as i32),
            numero_inscripciones: self
                .entero(
                    raw,
                    &["numero_inscripciones", "numeroInscripciones", "inscripciones", "enrollments"],
                )
                .map(|v| v as i32),
            tasa_desercion: self.decimal(
                raw,
                &["tasa_desercion", "tasaDesercion", "desercion", "dropout_rate"],
            ),
            tasa_promocion: self.decimal(
                raw,
                &["tasa_promocion", "tasaPromocion", "promocion", "promotion_rate"],
            ),
            numero_maestros: self
                .entero(raw, &["numero_maestros", "numeroMaestros", "maestros", "teachers"])
                .map(|v| v as i32),
            promedio_calificaciones: self.decimal(
                raw,
                &["promedio_calificaciones", "promedioCalificaciones", "promedio", "average_grade"],
            ),
            es_urbana: self.booleano(raw, &["es_urbana", "esUrbana", "urbana", "urban"]),
            row_index: raw.row_index,
        }
    }

    pub fn normalize_usuario(&self, raw: &RawRow) -> UsuarioRow {
        UsuarioRow {
            username: self.texto(raw, &["username", "usuario"]),
            email: self.texto(raw, &["email", "correo"]),
            password: self.texto(raw, &["password", "contrasena", "contraseña"]),
            role: self.texto(raw, &["role", "rol"]),
            row_index: raw.row_index,
        }
    }

    // ==========================================
    // Coerciones
    // ==========================================

    /// Texto recortado; cadenas vacías y nulos cuentan como ausentes.
    /// Una celda numérica se acepta como su representación textual.
    fn texto(&self, raw: &RawRow, sinonimos: &[&str]) -> Option<String> {
        match raw.cell(sinonimos)? {
            Value::String(s) => {
                let recortado = s.trim();
                if recortado.is_empty() {
                    None
                } else {
                    Some(recortado.to_string())
                }
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Entero desde celda numérica o texto con aspecto numérico.
    /// Texto no numérico cuenta como ausente.
    fn entero(&self, raw: &RawRow, sinonimos: &[&str]) -> Option<i64> {
        match raw.cell(sinonimos)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => {
                let recortado = s.trim();
                recortado
                    .parse::<i64>()
                    .ok()
                    .or_else(|| {
                        recortado
                            .parse::<f64>()
                            .ok()
                            .filter(|f| f.is_finite())
                            .map(|f| f.trunc() as i64)
                    })
            }
            _ => None,
        }
    }

    /// Decimal con semántica de dos decimales (tasas y promedios)
    fn decimal(&self, raw: &RawRow, sinonimos: &[&str]) -> Option<f64> {
        let valor = match raw.cell(sinonimos)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        if !valor.is_finite() {
            return None;
        }
        Some((valor * 100.0).round() / 100.0)
    }

    /// Booleano permisivo: true literal, "1" y las variantes
    /// "sí"/"si"/"yes"/"urbana" (sin distinguir mayúsculas) son verdadero;
    /// cualquier otro valor presente es falso; ausente queda ausente.
    fn booleano(&self, raw: &RawRow, sinonimos: &[&str]) -> Option<bool> {
        match raw.cell(sinonimos)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(n.as_f64() == Some(1.0) || n.as_i64() == Some(1)),
            Value::String(s) => {
                let bajo = s.trim().to_lowercase();
                Some(matches!(
                    bajo.as_str(),
                    "true" | "1" | "sí" | "si" | "yes" | "urbana"
                ))
            }
            _ => None,
        }
    }

    /// Fecha ISO (YYYY-MM-DD), con tolerancia a YYYY/MM/DD
    fn fecha(&self, raw: &RawRow, sinonimos: &[&str]) -> Option<NaiveDate> {
        let texto = self.texto(raw, sinonimos)?;
        NaiveDate::parse_from_str(&texto, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&texto, "%Y/%m/%d"))
            .ok()
    }

    /// Resuelve una clave foránea expresada como nombre humano contra la
    /// lista de referencia: coincidencia por subcadena sin distinguir
    /// mayúsculas, en ambas direcciones; gana la primera coincidencia.
    fn resolver_id(
        &self,
        raw: &RawRow,
        sinonimos: &[&str],
        lista: &[CatalogoNombre],
    ) -> Option<i64> {
        let valor = self.texto(raw, sinonimos)?.to_lowercase();
        lista
            .iter()
            .find(|entrada| {
                let nombre = entrada.nombre.to_lowercase();
                nombre.contains(&valor) || valor.contains(&nombre)
            })
            .map(|entrada| entrada.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalogo() -> Vec<CatalogoNombre> {
        vec![
            CatalogoNombre::new(1, "San Pedro"),
            CatalogoNombre::new(2, "Santa María del Río"),
            CatalogoNombre::new(3, "Centro"),
        ]
    }

    #[test]
    fn test_normalize_municipio_basico() {
        let normalizer = RowNormalizer;
        let fila = RawRow::new(1).with_cell("nombre", "  San Pedro  ");
        let row = normalizer.normalize_municipio(&fila);
        assert_eq!(row.nombre, Some("San Pedro".to_string()));
        assert_eq!(row.row_index, 1);
    }

    #[test]
    fn test_normalize_municipio_sinonimo_name() {
        let normalizer = RowNormalizer;
        let fila = RawRow::new(2).with_cell("name", "Centro");
        let row = normalizer.normalize_municipio(&fila);
        assert_eq!(row.nombre, Some("Centro".to_string()));
    }

    #[test]
    fn test_normalize_municipio_vacio_queda_ausente() {
        let normalizer = RowNormalizer;
        let fila = RawRow::new(2).with_cell("nombre", "   ");
        let row = normalizer.normalize_municipio(&fila);
        assert_eq!(row.nombre, None);
    }

    #[test]
    fn test_entero_desde_texto_y_numero() {
        let normalizer = RowNormalizer;
        let fila = RawRow::new(1)
            .with_cell("anio", "2024")
            .with_cell("cantidad_alumnos", json!(350))
            .with_cell("numero_inscripciones", "abc")
            .with_cell("numero_maestros", json!(12.0));
        let row = normalizer.normalize_datos(&fila, &[]);
        assert_eq!(row.anio, Some(2024));
        assert_eq!(row.cantidad_alumnos, Some(350));
        // texto no numérico cuenta como ausente, no como cero
        assert_eq!(row.numero_inscripciones, None);
        assert_eq!(row.numero_maestros, Some(12));
    }

    #[test]
    fn test_decimal_redondea_a_dos_decimales() {
        let normalizer = RowNormalizer;
        let fila = RawRow::new(1)
            .with_cell("tasa_desercion", json!(5.456))
            .with_cell("tasa_promocion", "87.125");
        let row = normalizer.normalize_datos(&fila, &[]);
        assert_eq!(row.tasa_desercion, Some(5.46));
        assert_eq!(row.tasa_promocion, Some(87.13));
    }

    #[test]
    fn test_booleano_permisivo() {
        let normalizer = RowNormalizer;
        for (valor, esperado) in [
            (json!(true), Some(true)),
            (json!("1"), Some(true)),
            (json!("Sí"), Some(true)),
            (json!("si"), Some(true)),
            (json!("YES"), Some(true)),
            (json!("urbana"), Some(true)),
            (json!("rural"), Some(false)),
            (json!("0"), Some(false)),
            (json!(false), Some(false)),
        ] {
            let fila = RawRow::new(1).with_cell("es_urbana", valor.clone());
            let row = normalizer.normalize_datos(&fila, &[]);
            assert_eq!(row.es_urbana, esperado, "valor: {:?}", valor);
        }

        // ausente queda ausente, no falso
        let fila = RawRow::new(1);
        let row = normalizer.normalize_datos(&fila, &[]);
        assert_eq!(row.es_urbana, None);
    }

    #[test]
    fn test_resolver_id_subcadena_bidireccional() {
        let normalizer = RowNormalizer;
        let municipios = catalogo();
        let tipos: Vec<CatalogoNombre> = vec![];

        // el valor de la fila contiene la entrada de la lista
        let fila = RawRow::new(1).with_cell("municipio", "municipio de san pedro");
        let row = normalizer.normalize_escuela(&fila, &municipios, &tipos);
        assert_eq!(row.municipio_id, Some(1));

        // la entrada de la lista contiene el valor de la fila
        let fila = RawRow::new(2).with_cell("municipio", "santa maría");
        let row = normalizer.normalize_escuela(&fila, &municipios, &tipos);
        assert_eq!(row.municipio_id, Some(2));

        // sin coincidencia: el id queda ausente
        let fila = RawRow::new(3).with_cell("municipio", "Desconocido");
        let row = normalizer.normalize_escuela(&fila, &municipios, &tipos);
        assert_eq!(row.municipio_id, None);
    }

    #[test]
    fn test_escuela_id_directo_gana_sobre_nombre() {
        let normalizer = RowNormalizer;
        let fila = RawRow::new(1)
            .with_cell("municipioId", json!(3))
            .with_cell("municipio", "San Pedro");
        let row = normalizer.normalize_escuela(&fila, &catalogo(), &[]);
        assert_eq!(row.municipio_id, Some(3));
    }

    #[test]
    fn test_datos_resuelve_escuela_por_nombre() {
        let normalizer = RowNormalizer;
        let escuelas = vec![
            CatalogoNombre::new(5, "Primaria Benito Juárez"),
            CatalogoNombre::new(9, "Secundaria Centro"),
        ];
        let fila = RawRow::new(1)
            .with_cell("escuela", "benito juárez")
            .with_cell("anio", "2024")
            .with_cell("semestre", json!(1));
        let row = normalizer.normalize_datos(&fila, &escuelas);
        assert_eq!(row.escuela_id, Some(5));
        assert_eq!(row.semestre, Some("1".to_string()));
    }

    #[test]
    fn test_normalize_usuario() {
        let normalizer = RowNormalizer;
        let fila = RawRow::new(4)
            .with_cell("username", "mlopez")
            .with_cell("correo", "mlopez@example.com")
            .with_cell("password", "secreto123")
            .with_cell("rol", "admin");
        let row = normalizer.normalize_usuario(&fila);
        assert_eq!(row.username, Some("mlopez".to_string()));
        assert_eq!(row.email, Some("mlopez@example.com".to_string()));
        assert_eq!(row.password, Some("secreto123".to_string()));
        assert_eq!(row.role, Some("admin".to_string()));
    }

    #[test]
    fn test_fecha_fundacion() {
        let normalizer = RowNormalizer;
        let fila = RawRow::new(1).with_cell("fecha_fundacion", "1998-05-20");
        let row = normalizer.normalize_escuela(&fila, &[], &[]);
        assert_eq!(
            row.fecha_fundacion,
            Some(NaiveDate::from_ymd_opt(1998, 5, 20).unwrap())
        );

        let fila = RawRow::new(1).with_cell("foundation_date", "1998/05/20");
        let row = normalizer.normalize_escuela(&fila, &[], &[]);
        assert_eq!(
            row.fecha_fundacion,
            Some(NaiveDate::from_ymd_opt(1998, 5, 20).unwrap())
        );

        // fecha inválida queda ausente (campo opcional)
        let fila = RawRow::new(1).with_cell("fecha_fundacion", "hace tiempo");
        let row = normalizer.normalize_escuela(&fila, &[], &[]);
        assert_eq!(row.fecha_fundacion, None);
    }
}
