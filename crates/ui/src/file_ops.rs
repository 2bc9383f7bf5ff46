//! File Operations for the admin console
//!
//! Native file dialogs (via `rfd`) for importing a client from JSON,
//! exporting a client as JSON, reading identity provider metadata and saving
//! adapter configuration downloads.
//! Reading, parsing and writing are plain functions so they can be tested
//! without a dialog.

use kc_console_core::{ConsoleError, ConsoleResult};
use kc_console_model::identity_provider::NO_VALID_METADATA;
use kc_console_model::{ClientRepresentation, OidcConfiguration};
use rfd::AsyncFileDialog;
use std::path::{Path, PathBuf};

// ============================================================================
// File Filter Constants
// ============================================================================

/// Extension of client export files
pub const JSON_EXTENSION: &str = "json";

/// Display name for the JSON file filter
pub const JSON_TYPE_NAME: &str = "JSON";

// ============================================================================
// File Dialog Functions
// ============================================================================

/// Ask for a client JSON file to import
///
/// Returns None if the dialog was cancelled.
pub async fn show_import_dialog() -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Import client")
        .add_filter(JSON_TYPE_NAME, &[JSON_EXTENSION])
        .add_filter("All Files", &["*"])
        .pick_file()
        .await?;

    Some(file.path().to_path_buf())
}

/// Ask for a provider metadata file
pub async fn show_metadata_dialog() -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Import config from file")
        .add_filter(JSON_TYPE_NAME, &[JSON_EXTENSION])
        .pick_file()
        .await?;

    Some(file.path().to_path_buf())
}

/// Ask where to save a file, suggesting `file_name`
pub async fn show_save_dialog(title: &str, file_name: &str) -> Option<PathBuf> {
    let mut dialog = AsyncFileDialog::new()
        .set_title(title)
        .set_file_name(file_name);

    if let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) {
        dialog = dialog.add_filter(ext.to_uppercase(), &[ext]);
    }

    let file = dialog.save_file().await?;
    Some(file.path().to_path_buf())
}

// ============================================================================
// Client Import / Export
// ============================================================================

/// Parse an exported client
pub fn parse_client_json(text: &str) -> ConsoleResult<ClientRepresentation> {
    if !text.trim_start().starts_with('{') {
        return Err(ConsoleError::validation("Expected a client object"));
    }
    Ok(serde_json::from_str(text)?)
}

fn read_text(path: &Path) -> ConsoleResult<String> {
    std::fs::read_to_string(path).map_err(|e| ConsoleError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse a client JSON file
pub fn read_client_file(path: &Path) -> ConsoleResult<ClientRepresentation> {
    parse_client_json(&read_text(path)?)
}

// ============================================================================
// Provider Metadata
// ============================================================================

/// Parse an uploaded discovery document
pub fn parse_metadata_json(text: &str) -> ConsoleResult<OidcConfiguration> {
    let metadata: OidcConfiguration = serde_json::from_str(text)?;
    if !metadata.is_valid() {
        return Err(ConsoleError::validation(NO_VALID_METADATA));
    }
    Ok(metadata)
}

/// Pick a provider metadata file and parse it
pub async fn import_metadata_file() -> ConsoleResult<(OidcConfiguration, PathBuf)> {
    let path = show_metadata_dialog().await.ok_or(ConsoleError::Cancelled)?;
    let metadata = parse_metadata_json(&read_text(&path)?)?;
    tracing::info!("Read provider metadata from {}", path.display());
    Ok((metadata, path))
}

/// Pretty JSON of a client without server-assigned ids
pub fn client_export_json(client: &ClientRepresentation) -> ConsoleResult<String> {
    let mut export = client.clone();
    export.id = None;
    if let Some(mappers) = export.protocol_mappers.as_mut() {
        for mapper in mappers {
            mapper.id = None;
        }
    }
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Write text to `path`
pub fn write_text(path: &Path, content: &str) -> ConsoleResult<()> {
    std::fs::write(path, content).map_err(|e| ConsoleError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Pick a client JSON file and parse it
pub async fn import_client_file() -> ConsoleResult<(ClientRepresentation, PathBuf)> {
    let path = show_import_dialog().await.ok_or(ConsoleError::Cancelled)?;
    let client = read_client_file(&path)?;
    tracing::info!("Read client '{}' from {}", client.client_id(), path.display());
    Ok((client, path))
}

/// Export a client to a JSON file the user picks
pub async fn export_client(client: &ClientRepresentation) -> ConsoleResult<PathBuf> {
    let json = client_export_json(client)?;
    let file_name = format!("{}.{}", client.client_id(), JSON_EXTENSION);
    let path = show_save_dialog("Export client", &file_name)
        .await
        .ok_or(ConsoleError::Cancelled)?;

    write_text(&path, &json)?;
    tracing::info!("Exported client '{}' to {}", client.client_id(), path.display());
    Ok(path)
}

/// Save a downloaded adapter configuration
pub async fn save_download(file_name: &str, content: &str) -> ConsoleResult<PathBuf> {
    let path = show_save_dialog("Download adapter config", file_name)
        .await
        .ok_or(ConsoleError::Cancelled)?;

    write_text(&path, content)?;
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kc_console_core::Protocol;
    use kc_console_model::ProtocolMapperRepresentation;
    use tempfile::tempdir;

    #[test]
    fn test_parse_client_json() {
        let client = parse_client_json(
            r#"{"clientId":"imported","protocol":"saml","frontchannelLogout":true}"#,
        )
        .unwrap();
        assert_eq!(client.client_id(), "imported");
        assert_eq!(client.protocol(), Some(Protocol::Saml));
        assert!(client.extra.contains_key("frontchannelLogout"));
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(parse_client_json("not json").is_err());
        assert!(parse_client_json("[]").is_err());
    }

    #[test]
    fn test_export_strips_ids() {
        let mut client = ClientRepresentation::new("account", Protocol::OpenIdConnect);
        client.id = Some("1a2b".into());
        client.protocol_mappers = Some(vec![ProtocolMapperRepresentation {
            id: Some("m1".into()),
            name: Some("email".into()),
            ..Default::default()
        }]);

        let json = client_export_json(&client).unwrap();
        assert!(!json.contains("1a2b"));
        assert!(!json.contains("m1"));
        assert!(json.contains("\"clientId\": \"account\""));
    }

    #[test]
    fn test_export_then_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("account.json");
        let client = ClientRepresentation::new("account", Protocol::OpenIdConnect);

        write_text(&path, &client_export_json(&client).unwrap()).unwrap();
        let read = read_client_file(&path).unwrap();
        assert_eq!(read.client_id(), "account");
    }

    #[test]
    fn test_metadata_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openid-configuration.json");
        write_text(
            &path,
            r#"{"issuer":"https://idp","authorization_endpoint":"https://idp/auth","token_endpoint":"https://idp/token"}"#,
        )
        .unwrap();

        let metadata = parse_metadata_json(&read_text(&path).unwrap()).unwrap();
        assert_eq!(metadata.issuer.as_deref(), Some("https://idp"));

        assert!(parse_metadata_json("{not json").is_err());
        let err = parse_metadata_json(r#"{"issuer":"https://idp"}"#).unwrap_err();
        assert!(err.to_string().contains(NO_VALID_METADATA));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_client_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_io());
    }
}
