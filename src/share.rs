//! Score sharing through the LINE share target picker
//!
//! The card is a Flex message built from typed structs and serialized with
//! serde; the browser side hands the JSON to `liff.shareTargetPicker`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where `liff.id` is appended to form the link back to the game
pub const LIFF_URL_BASE: &str = "https://liff.line.me/";

/// Placeholder in [`ShareCard::title`] replaced by the score
pub const SCORE_PLACEHOLDER: &str = "{score}";

/// Text and links of the shared card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareCard {
    /// Shown in chat lists and notifications
    pub alt_text: String,
    /// Bold headline; `{score}` is substituted
    pub title: String,
    pub subtitle: String,
    pub button_label: String,
    pub hero_image_url: String,
    pub hero_aspect_ratio: String,
    /// Notices shown after the picker closes
    pub shared_notice: String,
    pub cancelled_notice: String,
    pub failed_notice: String,
}

impl Default for ShareCard {
    fn default() -> Self {
        Self {
            alt_text: "シューティングゲームのスコアをシェア！".to_string(),
            title: "シューティングゲームで{score}点をとったよ！".to_string(),
            subtitle: "手軽に遊べるミニゲーム".to_string(),
            button_label: "遊んでみる！".to_string(),
            hero_image_url: "https://example.com/game-image.png".to_string(),
            hero_aspect_ratio: "20:13".to_string(),
            shared_notice: "シェアしました！".to_string(),
            cancelled_notice: "シェアをキャンセルしました。".to_string(),
            failed_notice: "エラーが発生しました。".to_string(),
        }
    }
}

/// A LINE message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: Container,
    },
}

/// Flex container
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Container {
    Bubble {
        hero: Component,
        body: Component,
        footer: Component,
    },
}

/// Flex component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    Box {
        layout: String,
        contents: Vec<Component>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        url: String,
        size: String,
        aspect_ratio: String,
        aspect_mode: String,
    },
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        weight: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        margin: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wrap: Option<bool>,
    },
    Button {
        action: Action,
        style: String,
    },
}

/// Tap action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Uri { label: String, uri: String },
}

impl ShareCard {
    pub fn title_for(&self, score: u64) -> String {
        self.title.replace(SCORE_PLACEHOLDER, &score.to_string())
    }

    /// Build the Flex message for a score; `liff_id` forms the play link
    pub fn message(&self, score: u64, liff_id: &str) -> Message {
        let hero = Component::Image {
            url: self.hero_image_url.clone(),
            size: "full".to_string(),
            aspect_ratio: self.hero_aspect_ratio.clone(),
            aspect_mode: "cover".to_string(),
        };
        let body = Component::Box {
            layout: "vertical".to_string(),
            contents: vec![
                Component::Text {
                    text: self.title_for(score),
                    size: Some("lg".to_string()),
                    weight: Some("bold".to_string()),
                    color: None,
                    margin: None,
                    wrap: Some(true),
                },
                Component::Text {
                    text: self.subtitle.clone(),
                    size: Some("sm".to_string()),
                    weight: None,
                    color: Some("#999999".to_string()),
                    margin: Some("md".to_string()),
                    wrap: None,
                },
            ],
        };
        let footer = Component::Box {
            layout: "vertical".to_string(),
            contents: vec![Component::Button {
                action: Action::Uri {
                    label: self.button_label.clone(),
                    uri: format!("{}{}", LIFF_URL_BASE, liff_id),
                },
                style: "primary".to_string(),
            }],
        };

        Message::Flex {
            alt_text: self.alt_text.clone(),
            contents: Container::Bubble { hero, body, footer },
        }
    }

    /// JSON array of messages, as `shareTargetPicker` expects
    pub fn messages_json(&self, score: u64, liff_id: &str) -> serde_json::Result<String> {
        serde_json::to_string(&[self.message(score, liff_id)])
    }

    /// User-facing notice for a share result; nothing when sharing was never
    /// offered
    pub fn notice(&self, result: &Result<ShareOutcome, ShareError>) -> Option<&str> {
        match result {
            Ok(ShareOutcome::Shared) => Some(self.shared_notice.as_str()),
            Ok(ShareOutcome::Cancelled) => Some(self.cancelled_notice.as_str()),
            Err(ShareError::Unavailable) => None,
            Err(ShareError::Rejected(_)) | Err(ShareError::Encode(_)) => {
                Some(self.failed_notice.as_str())
            }
        }
    }
}

/// How the picker closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Cancelled,
}

/// Why sharing failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// Not running inside LINE, or the picker is disabled for this app
    Unavailable,
    /// Payload could not be serialized
    Encode(String),
    /// The picker promise rejected
    Rejected(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::Unavailable => write!(f, "share target picker unavailable"),
            ShareError::Encode(e) => write!(f, "failed to encode share message: {}", e),
            ShareError::Rejected(e) => write!(f, "share target picker failed: {}", e),
        }
    }
}

impl std::error::Error for ShareError {}

/// Map the picker result to an outcome
///
/// `Ok(false)` is how the picker reports that the user closed it; any thrown
/// or rejected error becomes [`ShareError::Rejected`].
pub fn picker_outcome(picked: Result<bool, String>) -> Result<ShareOutcome, ShareError> {
    match picked {
        Ok(true) => Ok(ShareOutcome::Shared),
        Ok(false) => Ok(ShareOutcome::Cancelled),
        Err(e) => Err(ShareError::Rejected(e)),
    }
}

#[cfg(target_arch = "wasm32")]
mod liff {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(inline_js = "
        export function share_available() {
            return typeof liff !== 'undefined' && liff.isApiAvailable('shareTargetPicker');
        }

        export function app_id() {
            return (typeof liff !== 'undefined' && liff.id) ? liff.id : '';
        }

        export function share_target_picker(json) {
            return liff.shareTargetPicker(JSON.parse(json));
        }
    ")]
    extern "C" {
        pub fn share_available() -> bool;
        pub fn app_id() -> String;
        #[wasm_bindgen(catch)]
        pub fn share_target_picker(json: &str) -> Result<js_sys::Promise, JsValue>;
    }
}

/// Open the share target picker for a score
#[cfg(target_arch = "wasm32")]
pub async fn share_score(card: &ShareCard, score: u64) -> Result<ShareOutcome, ShareError> {
    use wasm_bindgen_futures::JsFuture;

    if !liff::share_available() {
        return Err(ShareError::Unavailable);
    }
    let json = card
        .messages_json(score, &liff::app_id())
        .map_err(|e| ShareError::Encode(e.to_string()))?;

    // The picker may throw before returning a promise
    let picked = match liff::share_target_picker(&json) {
        Ok(promise) => JsFuture::from(promise).await.map(|res| res.is_truthy()),
        Err(e) => Err(e),
    };
    picker_outcome(picked.map_err(|e| format!("{:?}", e)))
}

/// Share in the background and report the result with a blocking alert
#[cfg(target_arch = "wasm32")]
pub fn spawn_share(card: ShareCard, score: u64) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = share_score(&card, score).await;
        match &result {
            Ok(outcome) => log::info!("Share finished: {:?}", outcome),
            Err(e) => log::error!("Share failed: {}", e),
        }
        if let Some(notice) = card.notice(&result) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(notice);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn payload(score: u64) -> Value {
        let json = ShareCard::default().messages_json(score, "1234-abcd").unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_message_shape() {
        let v = payload(1500);
        let msg = &v[0];
        assert_eq!(msg["type"], "flex");
        assert_eq!(msg["altText"], "シューティングゲームのスコアをシェア！");
        let bubble = &msg["contents"];
        assert_eq!(bubble["type"], "bubble");
        assert_eq!(bubble["hero"]["type"], "image");
        assert_eq!(bubble["hero"]["aspectRatio"], "20:13");
        assert_eq!(bubble["hero"]["aspectMode"], "cover");
        assert_eq!(bubble["body"]["layout"], "vertical");
    }

    #[test]
    fn test_title_embeds_score() {
        let v = payload(1500);
        let title = &v[0]["contents"]["body"]["contents"][0];
        assert_eq!(title["text"], "シューティングゲームで1500点をとったよ！");
        assert_eq!(title["weight"], "bold");
        assert_eq!(title["wrap"], true);
        let subtitle = &v[0]["contents"]["body"]["contents"][1];
        assert_eq!(subtitle["color"], "#999999");
        assert!(subtitle.get("weight").is_none());
    }

    #[test]
    fn test_button_links_back_to_app() {
        let v = payload(0);
        let button = &v[0]["contents"]["footer"]["contents"][0];
        assert_eq!(button["type"], "button");
        assert_eq!(button["style"], "primary");
        assert_eq!(button["action"]["type"], "uri");
        assert_eq!(button["action"]["uri"], "https://liff.line.me/1234-abcd");
    }

    #[test]
    fn test_notices() {
        let card = ShareCard::default();
        assert_eq!(card.notice(&Ok(ShareOutcome::Shared)), Some("シェアしました！"));
        assert_eq!(
            card.notice(&Ok(ShareOutcome::Cancelled)),
            Some("シェアをキャンセルしました。")
        );
        assert_eq!(
            card.notice(&Err(ShareError::Rejected("boom".into()))),
            Some("エラーが発生しました。")
        );
        assert_eq!(card.notice(&Err(ShareError::Unavailable)), None);
    }

    #[test]
    fn test_picker_errors_become_rejections() {
        assert_eq!(picker_outcome(Ok(true)), Ok(ShareOutcome::Shared));
        assert_eq!(picker_outcome(Ok(false)), Ok(ShareOutcome::Cancelled));

        // Thrown synchronously or rejected later, the user sees the failure notice
        let result = picker_outcome(Err("TypeError: not in client".to_string()));
        assert_eq!(
            result,
            Err(ShareError::Rejected("TypeError: not in client".to_string()))
        );
        assert_eq!(
            ShareCard::default().notice(&result),
            Some("エラーが発生しました。")
        );
    }

    #[test]
    fn test_custom_card_from_json() {
        let card: ShareCard = serde_json::from_str(r#"{"title": "I scored {score}!"}"#).unwrap();
        assert_eq!(card.title_for(42), "I scored 42!");
        assert_eq!(card.button_label, "遊んでみる！");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ShareError::Rejected("denied".into()).to_string(),
            "share target picker failed: denied"
        );
    }
}
