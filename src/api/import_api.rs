// ==========================================
// Sistema BI Educativo - API de importación masiva
// ==========================================
// Punto de entrada de la carga masiva por entidad. Aquí viven
// las dos clases de error fatales de la llamada completa:
// - entrada vacía o malformada → BadRequest antes de procesar
// - importación de usuarios sin rol admin → Forbidden antes
//   de procesar
// Todo lo demás (validación y persistencia por fila) se acumula
// en el resumen { imported, failed, errors }.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::import::{ImportSummary, RawRow};
use crate::domain::types::{Rol, TipoEntidad};
use crate::domain::CatalogoNombre;
use crate::importer::{
    DatosEducativosImportStrategy, EscuelaImportStrategy, ImportCoordinator,
    MunicipioImportStrategy, TipoEscuelaImportStrategy, UniversalFileParser,
    UsuarioImportStrategy,
};
use crate::repository::{
    DatosEducativosRepository, EscuelaRepository, MunicipioRepository, TipoEscuelaRepository,
    UsuarioRepository,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct ImportApi {
    municipio_repo: Arc<MunicipioRepository>,
    tipo_repo: Arc<TipoEscuelaRepository>,
    escuela_repo: Arc<EscuelaRepository>,
    datos_repo: Arc<DatosEducativosRepository>,
    usuario_repo: Arc<UsuarioRepository>,
}

impl ImportApi {
    pub fn new(
        municipio_repo: Arc<MunicipioRepository>,
        tipo_repo: Arc<TipoEscuelaRepository>,
        escuela_repo: Arc<EscuelaRepository>,
        datos_repo: Arc<DatosEducativosRepository>,
        usuario_repo: Arc<UsuarioRepository>,
    ) -> Self {
        Self {
            municipio_repo,
            tipo_repo,
            escuela_repo,
            datos_repo,
            usuario_repo,
        }
    }

    pub async fn import_municipios(
        &self,
        rows: Vec<RawRow>,
        _rol: Rol,
    ) -> ApiResult<ImportSummary> {
        Self::check_rows(&rows)?;
        let strategy = MunicipioImportStrategy::new(self.municipio_repo.clone());
        Ok(ImportCoordinator::new(strategy).run(&rows).await)
    }

    pub async fn import_tipos_escuela(
        &self,
        rows: Vec<RawRow>,
        _rol: Rol,
    ) -> ApiResult<ImportSummary> {
        Self::check_rows(&rows)?;
        let strategy = TipoEscuelaImportStrategy::new(self.tipo_repo.clone());
        Ok(ImportCoordinator::new(strategy).run(&rows).await)
    }

    pub async fn import_escuelas(&self, rows: Vec<RawRow>, _rol: Rol) -> ApiResult<ImportSummary> {
        Self::check_rows(&rows)?;
        let (municipios, tipos) = self.listas_para_escuelas().await?;
        let strategy = EscuelaImportStrategy::new(self.escuela_repo.clone(), municipios, tipos);
        Ok(ImportCoordinator::new(strategy).run(&rows).await)
    }

    pub async fn import_datos_educativos(
        &self,
        rows: Vec<RawRow>,
        _rol: Rol,
    ) -> ApiResult<ImportSummary> {
        Self::check_rows(&rows)?;
        let escuelas = self.lista_de_escuelas().await?;
        let strategy = DatosEducativosImportStrategy::new(self.datos_repo.clone(), escuelas);
        Ok(ImportCoordinator::new(strategy).run(&rows).await)
    }

    /// Importación masiva de usuarios: reservada al rol admin.
    /// La violación es fatal para toda la llamada, antes de
    /// procesar cualquier fila.
    pub async fn import_usuarios(&self, rows: Vec<RawRow>, rol: Rol) -> ApiResult<ImportSummary> {
        if !rol.es_admin() {
            return Err(ApiError::Forbidden(
                "Solo los usuarios administradores pueden realizar la importación masiva de usuarios"
                    .to_string(),
            ));
        }
        Self::check_rows(&rows)?;
        let strategy = UsuarioImportStrategy::new(self.usuario_repo.clone());
        Ok(ImportCoordinator::new(strategy).run(&rows).await)
    }

    /// Importa directamente desde un archivo .csv/.xlsx del servidor
    /// (vía operativa; la carga normal llega como filas JSON).
    pub async fn import_file(
        &self,
        entidad: TipoEntidad,
        file_path: &Path,
        rol: Rol,
    ) -> ApiResult<ImportSummary> {
        let rows = UniversalFileParser
            .parse(file_path)
            .map_err(|e| ApiError::Import(e.to_string()))?;

        info!(
            entidad = %entidad,
            archivo = %file_path.display(),
            filas = rows.len(),
            "Archivo decodificado para importación"
        );

        match entidad {
            TipoEntidad::Municipios => self.import_municipios(rows, rol).await,
            TipoEntidad::TiposEscuela => self.import_tipos_escuela(rows, rol).await,
            TipoEntidad::Escuelas => self.import_escuelas(rows, rol).await,
            TipoEntidad::DatosEducativos => self.import_datos_educativos(rows, rol).await,
            TipoEntidad::Usuarios => self.import_usuarios(rows, rol).await,
        }
    }

    // ==========================================
    // Auxiliares
    // ==========================================

    /// Entrada vacía: fatal para la llamada completa
    fn check_rows(rows: &[RawRow]) -> ApiResult<()> {
        if rows.is_empty() {
            return Err(ApiError::BadRequest(
                "No se proporcionaron datos válidos para importar".to_string(),
            ));
        }
        Ok(())
    }

    async fn listas_para_escuelas(
        &self,
    ) -> ApiResult<(Vec<CatalogoNombre>, Vec<CatalogoNombre>)> {
        let municipios = self
            .municipio_repo
            .find_all()
            .await?
            .iter()
            .map(CatalogoNombre::from)
            .collect();
        let tipos = self
            .tipo_repo
            .find_all()
            .await?
            .iter()
            .map(CatalogoNombre::from)
            .collect();
        Ok((municipios, tipos))
    }

    async fn lista_de_escuelas(&self) -> ApiResult<Vec<CatalogoNombre>> {
        let escuelas = self
            .escuela_repo
            .find_all()
            .await?
            .iter()
            .map(|e| CatalogoNombre::new(e.id, e.nombre.clone()))
            .collect();
        Ok(escuelas)
    }
}
