/// Path constants and utilities for generated dossiers
use crate::error::{DossierError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE_PATH: &str = "assets/dossier/Dossier-Personalizado.pdf";
pub const DEFAULT_DOWNLOADS_BASE_PATH: &str = "/dossiers";

// Directory names
pub const OUTPUT_DIR_NAME: &str = "Dossiers_Personalizados_PlayaViva";
pub const DOCUMENTS_DIR_NAME: &str = "Documents";
pub const TEMP_OUTPUT_DIR_NAME: &str = "dossiers";

pub const PDF_EXTENSION: &str = "pdf";

/// Platform default output directory: the user's documents folder, then
/// `$HOME/Documents`, then the system temp directory.
pub fn default_output_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(DOCUMENTS_DIR_NAME)))
        .map(|documents| documents.join(OUTPUT_DIR_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(TEMP_OUTPUT_DIR_NAME))
}

/// Public delivery URL for a generated file; the file name is percent-encoded
pub fn delivery_url(downloads_base_path: &str, file_name: &str) -> String {
    format!(
        "{}/{}",
        downloads_base_path.trim_end_matches('/'),
        urlencoding::encode(file_name)
    )
}

/// Map a delivered file name back to the generated file on disk.
///
/// Accepts the name as it appears in the delivery URL (percent-encoded) or
/// decoded. Only bare `.pdf` file names are accepted; anything that could
/// escape the output directory is a validation error.
pub fn resolve_download(output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let file_name = urlencoding::decode(file_name)
        .map_err(|e| DossierError::Validation(format!("Invalid file name encoding: {}", e)))?;
    let file_name = file_name.as_ref();

    validate_download_name(file_name)?;

    let path = output_dir.join(file_name);
    if !path.is_file() {
        return Err(DossierError::NotFound(format!("Dossier not available: {}", file_name)));
    }

    Ok(path)
}

fn validate_download_name(file_name: &str) -> Result<()> {
    if file_name.is_empty() {
        return Err(DossierError::Validation("Empty file name".to_string()));
    }

    if file_name.contains(['/', '\\']) || file_name.contains("..") {
        return Err(DossierError::Validation(format!("Invalid file name: {}", file_name)));
    }

    let has_pdf_extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
        .unwrap_or(false);

    if !has_pdf_extension {
        return Err(DossierError::Validation(format!("Not a PDF file name: {}", file_name)));
    }

    Ok(())
}

// Tests module
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir_ends_with_dossier_folder() {
        let dir = default_output_dir();
        assert!(
            dir.ends_with(OUTPUT_DIR_NAME) || dir.ends_with(TEMP_OUTPUT_DIR_NAME),
            "unexpected default output dir {:?}",
            dir
        );
    }

    #[test]
    fn test_delivery_url_joins_once() {
        assert_eq!(delivery_url("/dossiers", "a.pdf"), "/dossiers/a.pdf");
        assert_eq!(delivery_url("/dossiers/", "a.pdf"), "/dossiers/a.pdf");
        assert_eq!(
            delivery_url("https://cdn.example.com/descargas", "a.pdf"),
            "https://cdn.example.com/descargas/a.pdf"
        );
        assert_eq!(
            delivery_url("/dossiers", "Document_Playa_Viva_Ana_María_Ruiz.pdf"),
            "/dossiers/Document_Playa_Viva_Ana_Mar%C3%ADa_Ruiz.pdf"
        );
    }

    #[test]
    fn test_resolve_download_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();

        for bad in ["", "../secret.pdf", "sub/file.pdf", "..\\x.pdf", "notes.txt", "noext", "..%2Fsecret.pdf", "%FF.pdf"] {
            let err = resolve_download(dir.path(), bad).unwrap_err();
            assert!(matches!(err, DossierError::Validation(_)), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_resolve_download_finds_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let name = "Document_Playa_Viva_Ana_María_Ruiz.pdf";
        std::fs::write(dir.path().join(name), b"%PDF-1.5").unwrap();

        assert_eq!(resolve_download(dir.path(), name).unwrap(), dir.path().join(name));
        assert_eq!(
            resolve_download(dir.path(), "Document_Playa_Viva_Ana_Mar%C3%ADa_Ruiz.pdf").unwrap(),
            dir.path().join(name)
        );

        let missing = resolve_download(dir.path(), "Document_Playa_Viva_Nobody.pdf").unwrap_err();
        assert!(matches!(missing, DossierError::NotFound(_)));
    }
}
