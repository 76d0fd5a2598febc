use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Child,
};

use crate::tasks::{error::TaskError, tokio::executor::TaskRunner};

impl TaskRunner {
    /// Reads the child's stdout to EOF.
    ///
    /// Lines end at `\n`, `\r\n`, or a lone `\r`. Each line is decoded
    /// lossily, the lines are joined with `\n`, and the result is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IO`] if stdout was not piped or a read fails.
    pub(crate) async fn read_stdout(child: &mut Child) -> Result<String, TaskError> {
        let Some(stdout) = child.stdout.take() else {
            let msg = "Failed to take stdout of child process";

            #[cfg(feature = "tracing")]
            tracing::error!(msg);

            return Err(TaskError::IO(msg.to_string()));
        };

        let mut reader = BufReader::new(stdout);
        let mut lines: Vec<String> = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).await.map_err(|e| {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %e, "Error reading stdout");

                TaskError::IO(format!("Error reading stdout: {}", e))
            })?;
            if read == 0 {
                // EOF reached
                break;
            }
            lines.extend(Self::decode_lines(&buf));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(lines = lines.len(), "Stdout closed");

        Ok(lines.join("\n").trim().to_string())
    }

    /// Decodes one `\n`-terminated chunk, which holds more than one line when
    /// it contains a lone `\r`.
    fn decode_lines(raw: &[u8]) -> impl Iterator<Item = String> + '_ {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        raw.split(|&b| b == b'\r')
            .map(|line| String::from_utf8_lossy(line).into_owned())
    }
}
