use futures_util::{Sink, SinkExt};
use log::debug;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

/// Writes one text frame to the client.
pub async fn send_message_to_client<W>(writer: &mut W, content: String) -> Result<(), WsError>
where
  W: Sink<Message, Error = WsError> + Unpin,
{
  debug!("{content}");
  writer.send(Message::Text(content)).await
}

/// Writes `frames` in order, stopping at the first one that fails.
pub async fn send_messages_to_client<W>(writer: &mut W, frames: Vec<String>) -> Result<(), WsError>
where
  W: Sink<Message, Error = WsError> + Unpin,
{
  for content in frames {
    send_message_to_client(writer, content).await?;
  }

  Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
  use futures_channel::mpsc::{self, UnboundedReceiver};
  use futures_util::{FutureExt, StreamExt};

  use super::*;

  #[cfg(test)]
  use pretty_assertions::assert_eq;

  /// In-memory writer: every frame sent lands in the returned receiver.
  pub(crate) fn make_writer_sut() -> (
    impl Sink<Message, Error = WsError> + Unpin,
    UnboundedReceiver<Message>,
  ) {
    let (tx, rx) = mpsc::unbounded::<Message>();
    (tx.sink_map_err(|_| WsError::ConnectionClosed), rx)
  }

  /// Drains whatever text frames were written so far.
  pub(crate) fn written_frames(rx: &mut UnboundedReceiver<Message>) -> Vec<String> {
    let mut frames = vec![];
    while let Some(Some(message)) = rx.next().now_or_never() {
      if let Message::Text(text) = message {
        frames.push(text);
      }
    }
    frames
  }

  #[tokio::test]
  async fn test_send_message_to_client() {
    let (mut writer, mut rx) = make_writer_sut();

    send_message_to_client(&mut writer, "first_content".to_string())
      .await
      .unwrap();

    let received = rx.next().await.unwrap();
    assert_eq!(received, Message::Text("first_content".to_string()));
  }

  #[tokio::test]
  async fn test_send_messages_to_client_keeps_the_order() {
    let (mut writer, mut rx) = make_writer_sut();

    send_messages_to_client(&mut writer, vec!["1".to_string(), "2".to_string(), "3".to_string()])
      .await
      .unwrap();

    assert_eq!(written_frames(&mut rx), vec!["1", "2", "3"]);
  }

  #[tokio::test]
  async fn test_send_fails_once_the_client_is_gone() {
    let (mut writer, rx) = make_writer_sut();
    drop(rx);

    let result = send_messages_to_client(&mut writer, vec!["1".to_string()]).await;

    assert!(matches!(result, Err(WsError::ConnectionClosed)));
  }
}
