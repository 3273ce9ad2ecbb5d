use anyhow::Result;
use reqwest::Url;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::client::TinylinkClient;
use crate::code::short_code_from;

const MENU: &str = "Choose an action (1-shorten / 2-open / 3-get full URL / 0-exit): ";

/// Runs the menu loop until the user picks `0` or `input` ends.
///
/// Request failures are printed and the loop continues; only I/O errors on
/// `input` or `output` end the session early. `open` is called with the
/// redirect link for action `2`.
pub async fn run<R, W, O>(client: &TinylinkClient, input: R, mut output: W, open: O) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    O: Fn(&Url) -> Result<()>,
{
    let mut lines = input.lines();

    loop {
        let Some(choice) = prompt(&mut lines, &mut output, MENU).await? else {
            break;
        };

        let message = match choice.as_str() {
            "1" => {
                let Some(url) = prompt(&mut lines, &mut output, "URL to shorten: ").await? else {
                    break;
                };
                match client.shorten(&url).await {
                    Ok(code) => format!("Short URL: {}", client.full_url_link(&code)?),
                    Err(e) => format!("Error: {e:#}"),
                }
            }
            "2" => {
                let Some(link) = prompt(&mut lines, &mut output, "Short URL to open: ").await? else {
                    break;
                };
                let code = short_code_from(&link, client.base_url());
                let url = client.redirect_url(&code)?;
                match open(&url) {
                    Ok(()) => format!("Opening {url}"),
                    Err(e) => format!("Error: {e:#}"),
                }
            }
            "3" => {
                let Some(link) = prompt(&mut lines, &mut output, "Short URL to expand: ").await?
                else {
                    break;
                };
                let code = short_code_from(&link, client.base_url());
                match client.expand(&code).await {
                    Ok(Some(url)) => format!("Full URL: {url}"),
                    Ok(None) => "Error: short URL not found".to_string(),
                    Err(e) => format!("Error: {e:#}"),
                }
            }
            "0" => break,
            _ => "Invalid choice.".to_string(),
        };

        output.write_all(message.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }

    output.flush().await?;
    Ok(())
}

/// Writes `text` and reads one trimmed line. `None` at end of input.
async fn prompt<R, W>(lines: &mut Lines<R>, output: &mut W, text: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;

    Ok(lines.next_line().await?.map(|line| line.trim().to_owned()))
}
