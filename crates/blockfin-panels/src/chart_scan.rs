//! Chart screenshot upload and AI scan
//!
//! Uploads are checked for type and size before the proxy is contacted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use blockfin_insights::{InsightRequest, InsightType, InsightsClient};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::notify::{Notifier, Toast};

pub const TOAST_SOURCE: &str = "chart_scan";

/// 5 MB
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

pub const SCAN_PROMPT: &str = "Analyze this cryptocurrency chart. Identify the trend, key support \
     and resistance levels, notable chart patterns, and give a short-term outlook.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    /// `data:` URL or a remote image URL
    pub image_url: String,
}

impl ChartUpload {
    /// Encode raw file bytes as a `data:` URL upload
    pub fn from_bytes(file_name: impl Into<String>, content_type: impl Into<String>, bytes: &[u8]) -> Self {
        let content_type = content_type.into();
        let image_url = format!("data:{};base64,{}", content_type, STANDARD.encode(bytes));
        Self {
            file_name: file_name.into(),
            content_type,
            size_bytes: bytes.len() as u64,
            image_url,
        }
    }

    /// Size of the payload carried in a base64 `data:` URL, if any
    pub fn embedded_size(&self) -> Option<u64> {
        let rest = self.image_url.strip_prefix("data:")?;
        let (_, payload) = rest.split_once(";base64,")?;
        // Padding is optional; a trailing group of 2 or 3 chars carries 1 or 2 bytes
        let data = payload.trim_end().trim_end_matches('=');
        let tail = match data.len() % 4 {
            2 => 1,
            3 => 2,
            _ => 0,
        };
        Some((data.len() / 4 * 3 + tail) as u64)
    }

    /// The larger of the declared and embedded sizes
    pub fn effective_size(&self) -> u64 {
        self.size_bytes.max(self.embedded_size().unwrap_or(0))
    }
}

/// Reject non-image or oversized uploads
pub fn validate_upload(upload: &ChartUpload) -> Result<(), ValidationError> {
    if !upload.content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(ValidationError::UnsupportedFileType(upload.content_type.clone()));
    }

    let size = upload.effective_size();
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartScan {
    pub file_name: String,
    pub analysis: String,
    /// True when `analysis` is the canned answer
    pub fallback: bool,
}

pub struct ChartScanner {
    client: InsightsClient,
    notifier: Notifier,
}

impl ChartScanner {
    pub fn new(client: InsightsClient, notifier: Notifier) -> Self {
        Self { client, notifier }
    }

    /// Raise the destructive toast for a rejected upload and hand the error back
    pub fn reject(&self, err: ValidationError) -> ValidationError {
        self.notifier
            .toast(TOAST_SOURCE, Toast::destructive(err.title(), err.to_string()));
        err
    }

    pub async fn scan(&self, upload: ChartUpload) -> Result<ChartScan, ValidationError> {
        if let Err(e) = validate_upload(&upload) {
            return Err(self.reject(e));
        }

        tracing::info!(file = %upload.file_name, size = upload.effective_size(), "scanning chart");

        let request = InsightRequest::new(InsightType::Chart, SCAN_PROMPT).with_image_url(upload.image_url);
        let outcome = self.client.ask(request).await;

        if outcome.fell_back() {
            self.notifier.toast(
                TOAST_SOURCE,
                Toast::destructive(
                    "Analysis Failed",
                    "Could not reach the AI service; showing a generic analysis",
                ),
            );
        } else {
            self.notifier.toast(
                TOAST_SOURCE,
                Toast::info("Chart Analyzed", format!("{} analyzed", upload.file_name)),
            );
        }

        Ok(ChartScan {
            file_name: upload.file_name,
            fallback: outcome.fell_back(),
            analysis: outcome.response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::PanelEvent;
    use async_trait::async_trait;
    use blockfin_insights::{InsightResponse, InsightsError, InsightsTransport};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl InsightsTransport for Counting {
        async fn send(&self, request: &InsightRequest) -> blockfin_insights::Result<InsightResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(InsightsError::Transport("offline".to_string()));
            }
            assert_eq!(request.insight_type, InsightType::Chart);
            assert!(request.image_url.is_some());
            Ok(InsightResponse {
                response: "Ascending triangle, bullish bias".to_string(),
            })
        }
    }

    fn scanner(transport: Arc<Counting>) -> (ChartScanner, tokio::sync::broadcast::Receiver<PanelEvent>) {
        let notifier = Notifier::default();
        let rx = notifier.subscribe();
        (ChartScanner::new(InsightsClient::new(transport), notifier), rx)
    }

    fn last_toast(rx: &mut tokio::sync::broadcast::Receiver<PanelEvent>) -> Toast {
        let mut last = None;
        while let Ok(event) = rx.try_recv() {
            if let PanelEvent::Toast { toast, .. } = event {
                last = Some(toast);
            }
        }
        last.unwrap()
    }

    #[test]
    fn test_data_url_round_trip_size() {
        let upload = ChartUpload::from_bytes("btc.png", "image/png", &[7u8; 1000]);
        assert!(upload.image_url.starts_with("data:image/png;base64,"));
        assert_eq!(upload.embedded_size(), Some(1000));
        assert!(validate_upload(&upload).is_ok());
    }

    #[test]
    fn test_unpadded_payload_size_is_exact() {
        use base64::engine::general_purpose::STANDARD_NO_PAD;

        for len in [1000usize, 1001, 1002] {
            let bytes = vec![3u8; len];
            let upload = ChartUpload {
                file_name: "raw.png".to_string(),
                content_type: "image/png".to_string(),
                size_bytes: 0,
                image_url: format!("data:image/png;base64,{}", STANDARD_NO_PAD.encode(&bytes)),
            };
            assert_eq!(upload.embedded_size(), Some(len as u64));

            let padded = ChartUpload::from_bytes("raw.png", "image/png", &bytes);
            assert_eq!(padded.embedded_size(), Some(len as u64));
        }
    }

    #[test]
    fn test_rejects_non_image() {
        let upload = ChartUpload::from_bytes("notes.pdf", "application/pdf", b"%PDF");
        assert_eq!(
            validate_upload(&upload),
            Err(ValidationError::UnsupportedFileType("application/pdf".to_string()))
        );
    }

    #[tokio::test]
    async fn test_oversized_upload_never_reaches_network() {
        let transport = Arc::new(Counting::default());
        let (scanner, mut rx) = scanner(transport.clone());

        let upload = ChartUpload {
            file_name: "huge.png".to_string(),
            content_type: "image/png".to_string(),
            size_bytes: MAX_UPLOAD_BYTES + 1,
            image_url: "https://example.com/huge.png".to_string(),
        };
        let err = scanner.scan(upload).await.unwrap_err();

        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);

        let toast = last_toast(&mut rx);
        assert!(toast.is_destructive());
        assert_eq!(toast.title, "File Too Large");
    }

    #[test]
    fn test_reject_raises_destructive_toast() {
        let transport = Arc::new(Counting::default());
        let (scanner, mut rx) = scanner(transport.clone());

        let err = scanner.reject(ValidationError::UploadTooLarge {
            limit: MAX_UPLOAD_BYTES,
        });

        assert!(matches!(err, ValidationError::UploadTooLarge { .. }));
        let toast = last_toast(&mut rx);
        assert!(toast.is_destructive());
        assert_eq!(toast.title, "File Too Large");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_declared_size_cannot_hide_embedded_payload() {
        let transport = Arc::new(Counting::default());
        let (scanner, _rx) = scanner(transport.clone());

        let mut upload = ChartUpload::from_bytes("big.png", "image/png", &vec![0u8; 6 * 1024 * 1024]);
        upload.size_bytes = 10;
        assert!(scanner.scan(upload).await.is_err());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_scan() {
        let transport = Arc::new(Counting::default());
        let (scanner, mut rx) = scanner(transport.clone());

        let scan = scanner
            .scan(ChartUpload::from_bytes("eth.png", "image/png", b"\x89PNG"))
            .await
            .unwrap();
        assert_eq!(scan.analysis, "Ascending triangle, bullish bias");
        assert!(!scan.fallback);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert!(!last_toast(&mut rx).is_destructive());
    }

    #[tokio::test]
    async fn test_upstream_failure_uses_fallback() {
        let transport = Arc::new(Counting {
            fail: true,
            ..Default::default()
        });
        let (scanner, mut rx) = scanner(transport);

        let scan = scanner
            .scan(ChartUpload::from_bytes("sol.png", "image/png", b"\x89PNG"))
            .await
            .unwrap();
        assert!(scan.fallback);
        assert_eq!(
            scan.analysis,
            blockfin_insights::fallback::canned_response(InsightType::Chart)
        );

        let toast = last_toast(&mut rx);
        assert!(toast.is_destructive());
        assert_eq!(toast.title, "Analysis Failed");
    }
}
