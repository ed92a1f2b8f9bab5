use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::ExtractionError;

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image_bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Runs the `tesseract` binary over the whole image, reading from stdin.
/// No preprocessing; recognition quality is left to the engine.
pub struct TesseractCli {
    binary: String,
    language: String,
}

impl TesseractCli {
    pub fn new(binary: String, language: String) -> Self {
        Self { binary, language }
    }

    async fn run(&self, image_bytes: &[u8]) -> anyhow::Result<String> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start {}", self.binary))?;

        let mut stdin = child.stdin.take().context("tesseract stdin unavailable")?;
        let image = image_bytes.to_vec();
        let writer = tokio::spawn(async move {
            stdin.write_all(&image).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .context("failed to wait for tesseract")?;
        writer
            .await
            .context("tesseract stdin writer panicked")?
            .context("failed to write image to tesseract")?;

        if !output.status.success() {
            anyhow::bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image_bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = self
            .run(image_bytes)
            .await
            .map_err(|e| ExtractionError::Ocr(format!("{e:#}")))?;
        tracing::info!(chars = text.len(), lang = %self.language, "OCR complete");
        Ok(text)
    }
}
