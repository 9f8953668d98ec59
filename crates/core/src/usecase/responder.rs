use serde_json::Value;
use tokio::sync::oneshot;

use crate::domain::error::BridgeError;

/// 1 リクエスト分の応答（成功値 or 失敗）
pub type Response = Result<Value, BridgeError>;

/// コールバック型の応答チャネル。
///
/// `success` / `error` は self を消費するので、1 リクエストにつき応答は必ず 1 回になる。
pub trait MethodResult: Send + 'static {
    fn success(self, value: Value);

    fn error(self, error: BridgeError);

    fn send(self, response: Response)
    where
        Self: Sized,
    {
        match response {
            Ok(value) => self.success(value),
            Err(error) => self.error(error),
        }
    }
}

/// クロージャで応答を受け取る MethodResult
pub struct CallbackResult<F>(F);

impl<F> CallbackResult<F>
where
    F: FnOnce(Response) + Send + 'static,
{
    pub fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F> MethodResult for CallbackResult<F>
where
    F: FnOnce(Response) + Send + 'static,
{
    fn success(self, value: Value) {
        (self.0)(Ok(value))
    }

    fn error(self, error: BridgeError) {
        (self.0)(Err(error))
    }
}

/// oneshot チャネルで応答を受け取る MethodResult
pub struct OneshotResult {
    tx: oneshot::Sender<Response>,
}

/// 応答用の oneshot チャネルを作る
pub fn channel() -> (OneshotResult, oneshot::Receiver<Response>) {
    let (tx, rx) = oneshot::channel();
    (OneshotResult { tx }, rx)
}

impl OneshotResult {
    fn deliver(self, response: Response) {
        if self.tx.send(response).is_err() {
            log::debug!("Response dropped: caller no longer waiting");
        }
    }
}

impl MethodResult for OneshotResult {
    fn success(self, value: Value) {
        self.deliver(Ok(value))
    }

    fn error(self, error: BridgeError) {
        self.deliver(Err(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_callback_result_success() {
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let responder = CallbackResult::new(move |r: Response| {
            *sink.lock().unwrap() = Some(r);
        });
        responder.success(Value::String("en".into()));

        let got = seen.lock().unwrap().take().unwrap();
        assert_eq!(got.unwrap(), Value::String("en".into()));
    }

    #[tokio::test]
    async fn test_oneshot_result_error() {
        let (responder, rx) = channel();
        responder.send(Err(BridgeError::no_text()));

        let got = rx.await.unwrap();
        assert_eq!(got.unwrap_err(), BridgeError::no_text());
    }

    #[test]
    fn test_oneshot_receiver_dropped() {
        let (responder, rx) = channel();
        drop(rx);
        // 受信側が居なくてもパニックしない
        responder.success(Value::Null);
    }
}
