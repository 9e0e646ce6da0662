//! WLED JSON API client
//!
//! Frames are sent as an ordered list of segments to `POST /json/state`.
//! Requests are fire-and-forget: a failure is returned to the caller and
//! never retried.

use std::time::Duration;

use hometime_composer::segment::{Segment, encode};
use hometime_composer::{PixelBuffer, RenderConfig, Rgb};
use log::{debug, info};
use reqwest::{Client, StatusCode, header};
use serde::Serialize;
use thiserror::Error;

const STATE_PATH: &str = "/json/state";

#[derive(Debug, Error)]
pub enum WledError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("WLED responded with {0}")]
    Status(StatusCode),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Body of a state update
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct StateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub seg: Vec<SegmentState>,
}

/// One entry of the `seg` array
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct SegmentState {
    pub id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<Vec<[u8; 3]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    /// Individual LED colors, starting at the segment start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i: Option<Vec<[u8; 3]>>,
}

fn channels(color: Rgb) -> [u8; 3] {
    [color.r, color.g, color.b]
}

/// `{id, stop: 0}` entries deleting segments left over from a longer frame
fn removals(from: usize, to: usize) -> impl Iterator<Item = SegmentState> {
    (from..to).map(|id| SegmentState {
        id,
        stop: Some(0),
        ..SegmentState::default()
    })
}

/// State update showing `segments` in order, ids counted from 0
pub fn segments_request(
    segments: &[Segment],
    config: &RenderConfig,
    previous_count: usize,
) -> StateRequest {
    let mut seg: Vec<SegmentState> = segments
        .iter()
        .enumerate()
        .map(|(id, segment)| SegmentState {
            id,
            start: Some(segment.start),
            stop: Some(segment.stop),
            col: Some(vec![channels(segment.color)]),
            bri: segment.brightness_hint(config),
            i: None,
        })
        .collect();
    seg.extend(removals(segments.len(), previous_count));

    StateRequest {
        on: Some(true),
        bri: None,
        seg,
    }
}

/// State update setting every LED individually through a single segment
pub fn pixels_request(pixels: &[Rgb], previous_count: usize) -> StateRequest {
    let mut seg = vec![SegmentState {
        id: 0,
        start: Some(0),
        stop: Some(pixels.len()),
        i: Some(pixels.iter().copied().map(channels).collect()),
        ..SegmentState::default()
    }];
    seg.extend(removals(1, previous_count));

    StateRequest {
        on: Some(true),
        bri: None,
        seg,
    }
}

pub fn off_request() -> StateRequest {
    StateRequest {
        on: Some(false),
        ..StateRequest::default()
    }
}

/// Client for a single WLED controller
#[derive(Debug)]
pub struct WledClient {
    client: Client,
    state_url: String,
    max_segments: usize,
    dry_run: bool,
    /// Segments that may be configured on the controller
    active_segments: usize,
}

impl WledClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        max_segments: usize,
        dry_run: bool,
    ) -> Result<Self, WledError> {
        const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            state_url: format!("{}{STATE_PATH}", base_url.trim_end_matches('/')),
            max_segments,
            dry_run,
            active_segments: max_segments,
        })
    }

    pub fn state_url(&self) -> &str {
        &self.state_url
    }

    /// POST a state update
    pub async fn set_state(&self, state: &StateRequest) -> Result<(), WledError> {
        if self.dry_run {
            info!("[dry-run] POST {} {}", self.state_url, serde_json::to_string(state)?);
            return Ok(());
        }

        let response = self.client.post(&self.state_url).json(state).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WledError::Status(status));
        }
        Ok(())
    }

    /// State update for a rendered frame and the segment count it leaves
    ///
    /// Frames with more runs than the controller supports are sent pixel by
    /// pixel instead.
    pub fn frame_request<const N: usize>(
        &self,
        frame: &PixelBuffer<N>,
        config: &RenderConfig,
    ) -> (StateRequest, usize) {
        let segments = encode(frame);
        if segments.len() > self.max_segments {
            debug!(
                "{} segments exceed the limit of {}, sending pixels",
                segments.len(),
                self.max_segments
            );
            return (pixels_request(frame, self.active_segments), 1);
        }
        (
            segments_request(&segments, config, self.active_segments),
            segments.len(),
        )
    }

    /// Show a rendered frame
    pub async fn show_frame<const N: usize>(
        &mut self,
        frame: &PixelBuffer<N>,
        config: &RenderConfig,
    ) -> Result<(), WledError> {
        let (state, count) = self.frame_request(frame, config);
        self.apply(&state, count).await
    }

    /// Show raw pixels
    pub async fn show_pixels(&mut self, pixels: &[Rgb]) -> Result<(), WledError> {
        let state = pixels_request(pixels, self.active_segments);
        self.apply(&state, 1).await
    }

    /// Send `state`, tracking how many segments the controller holds
    ///
    /// After a failure the device state is unknown, so the next frame clears
    /// every segment id up to the limit again.
    async fn apply(&mut self, state: &StateRequest, count: usize) -> Result<(), WledError> {
        match self.set_state(state).await {
            Ok(()) => {
                self.active_segments = count;
                Ok(())
            }
            Err(e) => {
                self.active_segments = self.max_segments;
                Err(e)
            }
        }
    }

    pub async fn turn_off(&self) -> Result<(), WledError> {
        self.set_state(&off_request()).await
    }
}
