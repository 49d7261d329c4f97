#![allow(dead_code)]

use async_trait::async_trait;
use shelter_bot::ShelterError;
use shelter_bot::config::ShelterConfig;
use shelter_bot::db::{DogStorage, NewDog};
use shelter_bot::service::traits::{ImageProvider, MessageSink};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// A file-backed store in a fresh temp dir; keep the `TempDir` alive for the test.
pub async fn temp_storage() -> (DogStorage, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let cfg = ShelterConfig {
        database_url: format!("sqlite:{}", dir.path().join("shelter.sqlite").display()),
        max_connections: 4,
        connect_timeout: Duration::from_secs(5),
    };
    let storage = DogStorage::connect(&cfg)
        .await
        .expect("failed to open temp storage");
    (storage, dir)
}

pub async fn seed(storage: &DogStorage, count: usize) -> Vec<String> {
    let mut pictures = Vec::with_capacity(count);
    for n in 0..count {
        let picture = format!("https://images.dog.ceo/breeds/beagle/{n}.jpg");
        storage
            .insert(NewDog::with_picture(picture.clone()))
            .await
            .expect("seed insert failed");
        pictures.push(picture);
    }
    pictures
}

/// Image provider that always answers the same way.
pub struct FixedImages(pub Result<String, String>);

impl FixedImages {
    pub fn url(url: &str) -> Self {
        Self(Ok(url.to_string()))
    }

    pub fn down() -> Self {
        Self(Err("dog API unreachable".to_string()))
    }
}

#[async_trait]
impl ImageProvider for FixedImages {
    async fn random_image(&self) -> Result<String, ShelterError> {
        self.0.clone().map_err(ShelterError::Upstream)
    }
}

/// Sink that records every `(channel, text)` it is asked to send.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("sink lock poisoned").clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, channel: &str, text: &str) -> Result<(), ShelterError> {
        self.sent
            .lock()
            .expect("sink lock poisoned")
            .push((channel.to_string(), text.to_string()));
        Ok(())
    }
}

/// Sink whose gateway is always down.
pub struct FailingSink;

#[async_trait]
impl MessageSink for FailingSink {
    async fn send(&self, _channel: &str, _text: &str) -> Result<(), ShelterError> {
        Err(ShelterError::Gateway("channel_not_found".to_string()))
    }
}
