// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google Analytics Measurement Protocol dispatch.
//!
//! [`MeasurementProtocolSink`] is the production [`AnalyticsSink`]: each
//! call is stamped into an [`OutboundHit`] and placed on a bounded
//! channel without blocking; a background [`Dispatcher`] drains the
//! channel and POSTs JSON payloads to the collect endpoint. Hits are
//! fire-and-forget end to end — overflow and transport failures are
//! logged and dropped, never retried and never surfaced to the caller.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use beacon_analytics_core::{MeasurementId, Properties};

use crate::error::{AnalyticsError, Result};
use crate::sink::AnalyticsSink;

/// Default Measurement Protocol collect endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/mp/collect";

const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Configuration for the Measurement Protocol sink.
#[derive(Debug, Clone)]
pub struct MeasurementProtocolConfig {
	/// The measurement target hits are collected under.
	pub measurement_id: MeasurementId,
	/// API secret issued for the measurement target.
	pub api_secret: String,
	/// Stable client identifier for this browsing context.
	pub client_id: String,
	/// Collect endpoint URL.
	pub endpoint: String,
	/// Maximum number of hits queued ahead of the dispatcher.
	pub queue_capacity: usize,
}

impl MeasurementProtocolConfig {
	/// Creates a config with the default endpoint and queue capacity.
	pub fn new(
		measurement_id: MeasurementId,
		api_secret: impl Into<String>,
		client_id: impl Into<String>,
	) -> Self {
		Self {
			measurement_id,
			api_secret: api_secret.into(),
			client_id: client_id.into(),
			endpoint: DEFAULT_ENDPOINT.to_string(),
			queue_capacity: DEFAULT_QUEUE_CAPACITY,
		}
	}
}

/// A hit queued for delivery.
#[derive(Debug, Clone)]
pub struct OutboundHit {
	pub name: String,
	pub params: Properties,
	/// Snapshot of the session-scoped context at enqueue time.
	pub user_properties: Properties,
	pub timestamp: DateTime<Utc>,
}

/// Transport for delivering collect payloads.
#[async_trait]
pub trait HitTransport: Send + Sync {
	/// Delivers one collect payload.
	async fn deliver(&self, payload: Value) -> Result<()>;
}

/// reqwest-backed transport POSTing JSON to the collect endpoint.
pub struct HttpTransport {
	client: reqwest::Client,
	url: String,
}

impl HttpTransport {
	/// Creates a transport for the given config.
	pub fn new(config: &MeasurementProtocolConfig) -> Self {
		let url = format!(
			"{}?measurement_id={}&api_secret={}",
			config.endpoint, config.measurement_id, config.api_secret
		);
		Self {
			client: reqwest::Client::new(),
			url,
		}
	}
}

#[async_trait]
impl HitTransport for HttpTransport {
	async fn deliver(&self, payload: Value) -> Result<()> {
		let response = self.client.post(&self.url).json(&payload).send().await?;

		let status = response.status();
		if !status.is_success() {
			return Err(AnalyticsError::Rejected {
				status: status.as_u16(),
			});
		}

		Ok(())
	}
}

/// An [`AnalyticsSink`] that queues hits for the Measurement Protocol.
pub struct MeasurementProtocolSink {
	tx: mpsc::Sender<OutboundHit>,
	context: Mutex<Properties>,
}

impl MeasurementProtocolSink {
	/// Creates the sink and its dispatcher with an HTTP transport.
	///
	/// Spawn [`Dispatcher::run`] on a runtime; the dispatcher exits once
	/// every sink handle is dropped and the queue has drained.
	pub fn new(config: MeasurementProtocolConfig) -> (Self, Dispatcher) {
		let transport = Arc::new(HttpTransport::new(&config));
		Self::with_transport(config, transport)
	}

	/// Creates the sink with an injected transport.
	pub fn with_transport(
		config: MeasurementProtocolConfig,
		transport: Arc<dyn HitTransport>,
	) -> (Self, Dispatcher) {
		let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));

		let sink = Self {
			tx,
			context: Mutex::new(Properties::new()),
		};
		let dispatcher = Dispatcher {
			rx,
			transport,
			client_id: config.client_id,
		};
		(sink, dispatcher)
	}

	fn context_snapshot(&self) -> Properties {
		self
			.context
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.clone()
	}
}

impl AnalyticsSink for MeasurementProtocolSink {
	fn send_event(&self, name: &str, params: Properties) {
		let hit = OutboundHit {
			name: name.to_string(),
			params,
			user_properties: self.context_snapshot(),
			timestamp: Utc::now(),
		};

		if let Err(err) = self.tx.try_send(hit) {
			warn!(event = name, error = %err, "Dropped analytics hit");
		}
	}

	fn set_config(&self, target: &MeasurementId, params: Properties) {
		debug!(measurement_id = %target, "Updated session-scoped analytics context");
		let mut context = self.context.lock().unwrap_or_else(|e| e.into_inner());
		*context = params;
	}
}

/// Background task draining queued hits to the transport.
pub struct Dispatcher {
	rx: mpsc::Receiver<OutboundHit>,
	transport: Arc<dyn HitTransport>,
	client_id: String,
}

impl Dispatcher {
	/// Runs until every sink handle is dropped and the queue drains.
	pub async fn run(mut self) {
		info!(client_id = %self.client_id, "Starting analytics dispatcher");

		while let Some(hit) = self.rx.recv().await {
			let payload = collect_payload(&self.client_id, &hit);
			if let Err(e) = self.transport.deliver(payload).await {
				error!(error = %e, event = %hit.name, "Failed to deliver analytics hit");
			}
		}

		info!("Analytics dispatcher stopped");
	}
}

/// Builds the collect payload for one hit.
///
/// `user_id` is hoisted from the enriched params to the payload top
/// level; null context entries (an explicit reset) are skipped rather
/// than sent as empty user properties.
fn collect_payload(client_id: &str, hit: &OutboundHit) -> Value {
	let mut body = Map::new();
	body.insert("client_id".to_string(), json!(client_id));

	if let Some(user_id) = hit.params.get_str("user_id") {
		body.insert("user_id".to_string(), json!(user_id));
	}

	body.insert(
		"timestamp_micros".to_string(),
		json!(hit.timestamp.timestamp_micros()),
	);

	let user_properties: Map<String, Value> = hit
		.user_properties
		.iter()
		.filter(|(_, value)| !value.is_null())
		.map(|(key, value)| (key.clone(), json!({ "value": value })))
		.collect();
	if !user_properties.is_empty() {
		body.insert("user_properties".to_string(), Value::Object(user_properties));
	}

	body.insert(
		"events".to_string(),
		json!([{ "name": hit.name, "params": hit.params.clone().into_value() }]),
	);

	Value::Object(body)
}
