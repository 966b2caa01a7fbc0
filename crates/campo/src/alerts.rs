use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::clock::Clock;
use crate::config::AlertSettings;
use crate::errors::Result;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RULE_WIDTH: usize = 80;
const HEADER_RULE_WIDTH: usize = 47;
const SESSION_BORDER: usize = 30;

#[derive(Debug, Clone, Serialize)]
pub struct AlertRecord {
    pub alert_type: String,
    pub region: String,
    pub timestamp: DateTime<Local>,
    pub content: String,
}

impl AlertRecord {
    fn to_block(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!(
            "\n{rule}\nNUEVA ALERTA REGISTRADA\n{rule}\n🔹 Tipo: {kind}\n🔹 Región: {region}\n🔹 Fecha y Hora: {ts}\n{rule}\n\n{content}\n\n{rule}\nFIN DE ALERTA - {kind}\n{rule}\n\n",
            rule = rule,
            kind = self.alert_type,
            region = self.region,
            ts = self.timestamp.format(TIMESTAMP_FORMAT),
            content = self.content,
        )
    }
}

fn file_header(created: &str) -> String {
    let rule = "=".repeat(HEADER_RULE_WIDTH);
    format!(
        "\n{rule}\n    CAMPO FUTURO - ALERTAS AGRÍCOLAS\n    Sistema de Inteligencia para el Campo\n{rule}\nArchivo creado: {created}\nÚltima actualización: Se actualiza automáticamente\n{rule}\n\n",
        rule = rule,
        created = created,
    )
}

fn session_block(label: &str, started: &str) -> String {
    let border = "🌾".repeat(SESSION_BORDER);
    let blank = format!("🌾{}🌾", " ".repeat(76));
    format!(
        "\n\n{border}\n{blank}\n🌾    NUEVA {label}                                           🌾\n🌾    Iniciada: {started}                              🌾\n{blank}\n{border}\n\n",
        border = border,
        blank = blank,
        label = label.to_uppercase(),
        started = started,
    )
}

/// Single append-only text log shared by every agent.
///
/// Blocks are written with one `write_all` on an append-mode handle. There is
/// no cross-process locking: one writer per file.
pub struct AlertStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl AlertStore {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn from_settings(settings: &AlertSettings, clock: Arc<dyn Clock>) -> Self {
        Self::new(settings.log_path(), clock)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn timestamp(&self) -> String {
        self.clock.local_now().format(TIMESTAMP_FORMAT).to_string()
    }

    /// Create the log with its header unless it already exists.
    pub fn ensure_log(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                file.write_all(file_header(&self.timestamp()).as_bytes())?;
                tracing::info!("Initialized alert log at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_block(&self, block: &str) -> Result<()> {
        self.ensure_log()?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(block.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    pub fn append(&self, alert_type: &str, content: &str, region: &str) -> Result<AlertRecord> {
        let record = AlertRecord {
            alert_type: alert_type.to_string(),
            region: region.to_string(),
            timestamp: self.clock.local_now(),
            content: content.to_string(),
        };
        self.write_block(&record.to_block())?;
        tracing::info!("Saved alert {} for {}", alert_type, region);
        Ok(record)
    }

    pub fn start_session(&self, label: &str) -> Result<()> {
        self.write_block(&session_block(label, &self.timestamp()))?;
        tracing::info!("Started session: {}", label);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use regex::Regex;

    fn store(dir: &Path) -> AlertStore {
        AlertStore::new(
            dir.join("alertas_agricolas").join("ALERTAS.txt"),
            Arc::new(SystemClock),
        )
    }

    #[test]
    fn test_ensure_log_writes_one_header() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(temp_dir.path());

        for _ in 0..3 {
            store.ensure_log().unwrap();
        }

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.matches("CAMPO FUTURO - ALERTAS AGRÍCOLAS").count(), 1);
        let ts = Regex::new(r"Archivo creado: \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\n").unwrap();
        assert!(ts.is_match(&contents));
    }

    #[test]
    fn test_append_block_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(temp_dir.path());

        let record = store
            .append("PREDICTOR_INUNDACIONES_ANALISIS_INUNDACIONES", "Riesgo alto", "Colombia")
            .unwrap();
        assert_eq!(record.region, "Colombia");

        let contents = fs::read_to_string(store.path()).unwrap();
        let rule = "=".repeat(80);
        let block = Regex::new(&format!(
            "\n{rule}\nNUEVA ALERTA REGISTRADA\n{rule}\n🔹 Tipo: PREDICTOR_INUNDACIONES_ANALISIS_INUNDACIONES\n🔹 Región: Colombia\n🔹 Fecha y Hora: \\d{{4}}-\\d{{2}}-\\d{{2}} \\d{{2}}:\\d{{2}}:\\d{{2}}\n{rule}\n\nRiesgo alto\n\n{rule}\nFIN DE ALERTA - PREDICTOR_INUNDACIONES_ANALISIS_INUNDACIONES\n{rule}\n\n$",
            rule = rule
        ))
        .unwrap();
        assert!(block.is_match(&contents), "unexpected log:\n{}", contents);
    }

    #[test]
    fn test_identical_appends_are_not_deduplicated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(temp_dir.path());

        store.append("MERCADO", "same", "Perú").unwrap();
        store.append("MERCADO", "same", "Perú").unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.matches("NUEVA ALERTA REGISTRADA").count(), 2);
    }

    #[test]
    fn test_existing_log_is_never_truncated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(temp_dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "earlier history\n").unwrap();

        store.ensure_log().unwrap();
        store.append("PLAGAS", "roya", "Colombia").unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.starts_with("earlier history\n"));
        assert!(!contents.contains("CAMPO FUTURO - ALERTAS AGRÍCOLAS"));
        assert!(store.size() > "earlier history\n".len() as u64);
    }

    #[test]
    fn test_session_block() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(temp_dir.path());

        store.start_session("sesión de monitoreo").unwrap();
        store.append("SEQUIA", "ok", "Chile").unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let session_at = contents.find("🌾    NUEVA SESIÓN DE MONITOREO").unwrap();
        let alert_at = contents.find("NUEVA ALERTA REGISTRADA").unwrap();
        assert!(session_at < alert_at);
        assert!(contents.contains("🌾    Iniciada: "));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, "file").unwrap();

        let store = AlertStore::new(blocker.join("log.txt"), Arc::new(SystemClock));
        assert!(store.append("X", "y", "z").is_err());
        assert!(!store.exists());
    }
}
