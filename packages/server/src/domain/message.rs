//! Message grammar
//!
//! ワイヤー上の 1 行が 1 メッセージです。
//!
//! ```text
//! IMAGE:<name>:<base64>   画像（先頭 2 つの ':' でのみ分割）
//! <それ以外の行>           テキスト（そのままブロードキャスト）
//! ```

use super::{
    error::MessageError,
    value_object::{ConnectionId, ImageName, Locator},
};

/// 画像メッセージの接頭辞
pub const IMAGE_MARKER: &str = "IMAGE:";

/// 管理者メッセージのラベル
pub const ADMIN_LABEL: &str = "Administrator";

/// クライアントから受信した 1 行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// そのままブロードキャストするテキスト
    Text(String),
    /// Base64 エンコードされた画像
    Image(ImagePayload),
}

/// デコード前の画像ペイロード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub name: ImageName,
    pub data: String,
}

impl Message {
    /// 受信した行を解釈する
    ///
    /// 画像マーカーで始まらない行は常に `Text` になります。
    /// マーカーで始まる行はフィールドが欠けていたり名前が不正な場合にエラーになります。
    pub fn parse(line: &str) -> Result<Self, MessageError> {
        let Some(rest) = line.strip_prefix(IMAGE_MARKER) else {
            return Ok(Self::Text(line.to_string()));
        };

        let (name, data) = rest
            .split_once(':')
            .ok_or(MessageError::MissingImageData)?;

        Ok(Self::Image(ImagePayload {
            name: ImageName::new(name.to_string())?,
            data: data.to_string(),
        }))
    }
}

/// 接続時の通知
pub fn join_notice(id: &ConnectionId) -> String {
    format!("Client connected: {}", id)
}

/// 切断時の通知
pub fn leave_notice(id: &ConnectionId) -> String {
    format!("Client disconnected: {}", id)
}

/// 管理者入力に付けるラベル
pub fn admin_message(line: &str) -> String {
    format!("{}: {}", ADMIN_LABEL, line)
}

/// 保存済み画像のリンク
pub fn image_link(name: &ImageName, locator: &Locator) -> String {
    format!("{}{}:{}", IMAGE_MARKER, name, locator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageNameError;

    #[test]
    fn test_parse_plain_text() {
        // テスト項目: 画像マーカーで始まらない行はテキストとして扱われる
        // given (前提条件):
        let line = "hello: world";

        // when (操作):
        let result = Message::parse(line);

        // then (期待する結果):
        assert_eq!(result, Ok(Message::Text("hello: world".to_string())));
    }

    #[test]
    fn test_parse_marker_is_case_sensitive() {
        // テスト項目: 小文字の "image:" はテキストとして扱われる
        // given (前提条件):
        let line = "image:photo.png:AAAA";

        // when (操作):
        let result = Message::parse(line);

        // then (期待する結果):
        assert_eq!(result, Ok(Message::Text(line.to_string())));
    }

    #[test]
    fn test_parse_image_payload() {
        // テスト項目: 画像行は名前とデータに分割される
        // given (前提条件):
        let line = "IMAGE:photo.png:aGVsbG8=";

        // when (操作):
        let result = Message::parse(line).unwrap();

        // then (期待する結果):
        let Message::Image(payload) = result else {
            panic!("expected image payload");
        };
        assert_eq!(payload.name.as_str(), "photo.png");
        assert_eq!(payload.data, "aGVsbG8=");
    }

    #[test]
    fn test_parse_image_splits_only_twice() {
        // テスト項目: データ部分に ':' が含まれても 3 つ目のフィールドにまとめられる
        // given (前提条件):
        let line = "IMAGE:photo.png:abc:def";

        // when (操作):
        let result = Message::parse(line).unwrap();

        // then (期待する結果):
        let Message::Image(payload) = result else {
            panic!("expected image payload");
        };
        assert_eq!(payload.data, "abc:def");
    }

    #[test]
    fn test_parse_image_missing_data_field() {
        // テスト項目: 2 つ目の ':' がない画像行はエラーになる
        // given (前提条件):
        let line = "IMAGE:photo.png";

        // when (操作):
        let result = Message::parse(line);

        // then (期待する結果):
        assert_eq!(result, Err(MessageError::MissingImageData));
    }

    #[test]
    fn test_parse_image_rejects_traversal_name() {
        // テスト項目: 不正な画像名を含む行はエラーになる
        // given (前提条件):
        let line = "IMAGE:..:aGVsbG8=";

        // when (操作):
        let result = Message::parse(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessageError::InvalidImageName(ImageNameError::PathTraversal(
                "..".to_string()
            )))
        );
    }

    #[test]
    fn test_parse_image_rejects_empty_name() {
        // テスト項目: 画像名が空の行はエラーになる
        // given (前提条件):
        let line = "IMAGE::aGVsbG8=";

        // when (操作):
        let result = Message::parse(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessageError::InvalidImageName(ImageNameError::Empty))
        );
    }

    #[test]
    fn test_notices_name_the_connection() {
        // テスト項目: 接続・切断通知に接続 ID が含まれる
        // given (前提条件):
        let id = ConnectionId::new("127.0.0.1:9000");

        // when (操作):
        let joined = join_notice(&id);
        let left = leave_notice(&id);

        // then (期待する結果):
        assert_eq!(joined, format!("Client connected: {}", id));
        assert_eq!(left, format!("Client disconnected: {}", id));
    }

    #[test]
    fn test_image_link_format() {
        // テスト項目: 画像リンクは IMAGE:<name>:<locator> 形式になる
        // given (前提条件):
        let name = ImageName::try_from("photo.png").unwrap();
        let locator = Locator::new("file:///tmp/photo.png");

        // when (操作):
        let link = image_link(&name, &locator);

        // then (期待する結果):
        assert_eq!(link, "IMAGE:photo.png:file:///tmp/photo.png");
    }

    #[test]
    fn test_admin_message_is_labelled() {
        // テスト項目: 管理者メッセージにラベルが付く
        // given (前提条件):
        let line = "server restarts at noon";

        // when (操作):
        let result = admin_message(line);

        // then (期待する結果):
        assert_eq!(result, "Administrator: server restarts at noon");
    }
}
