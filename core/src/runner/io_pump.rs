use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::RunnerError;

/// Line-at-a-time reader over a runner's stdout.
pub struct LinePump<R> {
    rd: BufReader<R>,
    model: String,
    buf: Vec<u8>,
}

impl<R> LinePump<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(rd: R, model: impl Into<String>) -> Self {
        Self {
            rd: BufReader::with_capacity(16 * 1024, rd),
            model: model.into(),
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    /// Next line with trailing whitespace removed, or `None` once the stream
    /// is closed. A final line without `\n` is still delivered.
    pub async fn next_line(&mut self) -> Result<Option<String>, RunnerError> {
        self.buf.clear();
        let n = self
            .rd
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|e| RunnerError::StreamIo {
                stream: "stdout",
                source: e,
            })?;
        if n == 0 {
            return Ok(None);
        }

        let line = String::from_utf8(std::mem::take(&mut self.buf)).map_err(|e| {
            RunnerError::Decode {
                model: self.model.clone(),
                source: e,
            }
        })?;
        Ok(Some(line.trim_end().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn flushes_last_line_without_newline_on_eof() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let mut pump = LinePump::new(rd, "m");

        wr.write_all(b"first\r\nhello").await.unwrap();
        drop(wr);

        assert_eq!(pump.next_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(pump.next_line().await.unwrap().as_deref(), Some("hello"));
        assert_eq!(pump.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn trims_trailing_but_not_leading_whitespace() {
        let mut pump = LinePump::new(&b"  indented \t\n\n"[..], "m");
        assert_eq!(
            pump.next_line().await.unwrap().as_deref(),
            Some("  indented")
        );
        assert_eq!(pump.next_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(pump.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn waits_for_line_split_across_writes() {
        let (mut wr, rd) = tokio::io::duplex(64);
        let mut pump = LinePump::new(rd, "m");

        let writer = tokio::spawn(async move {
            wr.write_all(b"par").await.unwrap();
            tokio::task::yield_now().await;
            wr.write_all(b"tial\n").await.unwrap();
        });

        assert_eq!(pump.next_line().await.unwrap().as_deref(), Some("partial"));
        writer.await.unwrap();
        assert_eq!(pump.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_utf8_is_decode_error() {
        let mut pump = LinePump::new(&b"ok\n\xff\xfe\n"[..], "gemma");
        assert_eq!(pump.next_line().await.unwrap().as_deref(), Some("ok"));
        let err = pump.next_line().await.unwrap_err();
        assert!(matches!(err, RunnerError::Decode { ref model, .. } if model == "gemma"));
    }
}
