#![forbid(unsafe_code)]

use super::framing::{
    TransportMode, detect_mode_from_first_line, parse_request, read_content_length_frame,
    read_raw_line, write_frame,
};
use crate::McpServer;
use std::io::{BufRead, BufReader, Write};

pub(crate) fn run_stdio(server: &mut McpServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();
    serve(server, &mut reader, &mut stdout)
}

/// Framing is detected once from the first non-blank line and kept for the session.
pub(crate) fn serve<R: BufRead, W: Write>(
    server: &mut McpServer,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mode: Option<TransportMode> = None;

    loop {
        let Some(raw) = read_raw_line(reader)? else {
            break;
        };
        let line = String::from_utf8_lossy(&raw).into_owned();
        let current = match mode {
            Some(current) => current,
            None => match detect_mode_from_first_line(&line) {
                Some(detected) => {
                    tracing::debug!(mode = ?detected, "transport framing detected");
                    mode = Some(detected);
                    detected
                }
                None => continue,
            },
        };

        let body = match current {
            TransportMode::NewlineJson => {
                let body = raw.trim_ascii();
                if body.is_empty() {
                    continue;
                }
                body.to_vec()
            }
            TransportMode::ContentLength => {
                if line.trim().is_empty() {
                    continue;
                }
                let Some(body) = read_content_length_frame(reader, line)? else {
                    break;
                };
                body
            }
        };

        let resp = match parse_request(&body) {
            Ok(request) => server.handle(request),
            Err(resp) => Some(resp),
        };
        if let Some(resp) = resp {
            write_frame(writer, current, &resp)?;
        }
    }

    Ok(())
}
