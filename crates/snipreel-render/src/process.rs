//! Subprocess bridge to the external headless renderer.
//!
//! The engine speaks newline-delimited JSON over stdio. A bundle run prints a
//! `bundled` message carrying the serve URL. A render run reads `start`, one
//! `frame` per index in order, and `finish`, and answers with `progress`
//! messages followed by `done` or `error`.

use std::process::Stdio;

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{ChildStdin, ChildStdout, Command};

use snipreel_core::RendererConfig;

use crate::backend::{ProgressCallback, RenderBackend, RenderSpec, ServeHandle};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum EngineMessage {
    Bundled {
        #[serde(rename = "serveUrl")]
        serve_url: String,
    },
    Progress {
        progress: f64,
    },
    Done,
    Error {
        error: String,
    },
    #[serde(other)]
    Unknown,
}

fn parse_message(line: &str) -> Option<EngineMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(msg) => Some(msg),
        Err(_) => {
            tracing::debug!(line, "Renderer output");
            None
        }
    }
}

/// Drives the external engine as a child process per operation.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    command: String,
    args: Vec<String>,
    bundle_entry: String,
}

impl ProcessBackend {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            bundle_entry: config.bundle_entry.clone(),
        }
    }

    fn command(&self, subcommand: &str) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg(subcommand)
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl RenderBackend for ProcessBackend {
    async fn bundle(&self) -> anyhow::Result<ServeHandle> {
        let output = self
            .command("bundle")
            .arg(&self.bundle_entry)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to spawn renderer `{}`", self.command))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut serve = None;
        let mut engine_error = None;
        for msg in stdout.lines().filter_map(parse_message) {
            match msg {
                EngineMessage::Bundled { serve_url } => serve = Some(serve_url),
                EngineMessage::Error { error } => engine_error = Some(error),
                _ => {}
            }
        }

        if let Some(error) = engine_error {
            bail!("Renderer bundle error: {error}");
        }
        if !output.status.success() {
            bail!("Renderer bundle exited with {}", output.status);
        }
        serve
            .map(ServeHandle)
            .ok_or_else(|| anyhow!("Renderer did not report a serve URL"))
    }

    async fn render(
        &self,
        serve: &ServeHandle,
        spec: &RenderSpec,
        on_progress: ProgressCallback,
    ) -> anyhow::Result<()> {
        let mut child = self
            .command("render")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn renderer `{}`", self.command))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("Renderer stdin not available"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Renderer stdout not available"))?;

        let (written, read) = tokio::join!(
            send_frames(stdin, serve, spec),
            read_replies(stdout, on_progress)
        );
        let status = child.wait().await.context("Failed to wait for renderer")?;

        let reply = read?;
        if let Some(error) = reply.error {
            bail!("{error}");
        }
        written?;
        if !status.success() {
            bail!("Renderer exited with {status}");
        }
        if !reply.done {
            bail!("Renderer exited without finishing the render");
        }
        Ok(())
    }
}

async fn send_frames(stdin: ChildStdin, serve: &ServeHandle, spec: &RenderSpec) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(stdin);
    let settings = spec.composition.settings();

    let start = json!({
        "type": "start",
        "serveUrl": serve.as_str(),
        "compositionId": spec.composition_id,
        "width": settings.width,
        "height": settings.height,
        "fps": settings.fps,
        "durationInFrames": spec.frame_count,
        "codec": spec.codec,
        "outputLocation": spec.output_path.to_string_lossy(),
        "inputProps": serde_json::to_value(spec.composition.props())?,
    });

    let result = async {
        write_line(&mut writer, &start).await?;
        for index in 0..spec.frame_count {
            let state = serde_json::to_value(spec.composition.frame(index))?;
            write_line(
                &mut writer,
                &json!({ "type": "frame", "index": index, "state": state }),
            )
            .await?;
        }
        write_line(&mut writer, &json!({ "type": "finish" })).await?;
        writer.shutdown().await?;
        Ok::<_, anyhow::Error>(())
    }
    .await;

    match result {
        Err(e)
            if e.downcast_ref::<std::io::Error>()
                .is_some_and(|io| io.kind() == std::io::ErrorKind::BrokenPipe) =>
        {
            // The engine stopped reading; its own reply says why.
            Ok(())
        }
        other => other,
    }
}

async fn write_line(
    writer: &mut BufWriter<ChildStdin>,
    msg: &serde_json::Value,
) -> anyhow::Result<()> {
    let line = msg.to_string() + "\n";
    writer.write_all(line.as_bytes()).await?;
    Ok(())
}

#[derive(Debug, Default)]
struct EngineReply {
    done: bool,
    error: Option<String>,
}

async fn read_replies(stdout: ChildStdout, on_progress: ProgressCallback) -> anyhow::Result<EngineReply> {
    let mut lines = BufReader::new(stdout).lines();
    let mut reply = EngineReply::default();
    while let Some(line) = lines.next_line().await? {
        match parse_message(&line) {
            Some(EngineMessage::Progress { progress }) => on_progress(progress),
            Some(EngineMessage::Done) => reply.done = true,
            Some(EngineMessage::Error { error }) => reply.error = Some(error),
            Some(EngineMessage::Bundled { .. }) | Some(EngineMessage::Unknown) | None => {}
        }
    }
    Ok(reply)
}
