// file: src/test_support.rs
// description: in-memory service fakes and PDF fixtures shared by unit tests
// reference: trait-based dependency injection for pipeline tests

use crate::error::{PipelineError, Result};
use crate::extractor::Annotator;
use crate::models::{DetectedEntity, KeyPhrase, SearchDocument};
use crate::search::{IndexReceipt, SearchIndex};
use crate::storage::{DownloadedObject, ObjectStore};
use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Builds a PDF with one page per entry, each page drawing its text once.
pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

pub fn s3_event(bucket: &str, key: &str) -> Value {
    json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "bucket": { "name": bucket, "arn": format!("arn:aws:s3:::{}", bucket) },
                "object": { "key": key }
            }
        }]
    })
}

#[derive(Default)]
pub struct FakeObjectStore {
    objects: HashMap<(String, String), Vec<u8>>,
    downloads: AtomicUsize,
}

impl FakeObjectStore {
    pub fn with_object(mut self, bucket: &str, key: &str, bytes: Vec<u8>) -> Self {
        self.objects
            .insert((bucket.to_string(), key.to_string()), bytes);
        self
    }

    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn download(&self, bucket: &str, key: &str) -> Result<DownloadedObject> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        let bytes = self
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .ok_or_else(|| PipelineError::storage(bucket, key, "object does not exist"))?;
        DownloadedObject::from_bytes(bytes, None)
    }
}

/// Answers the n-th call of each operation with the n-th scripted response.
#[derive(Default)]
pub struct ScriptedAnnotator {
    key_phrases: Vec<Vec<KeyPhrase>>,
    entities: Vec<Vec<DetectedEntity>>,
    fail_on_call: Option<usize>,
    key_phrase_calls: AtomicUsize,
    entity_calls: AtomicUsize,
    seen_languages: Mutex<Vec<String>>,
}

impl ScriptedAnnotator {
    pub fn with_key_phrases(mut self, per_call: Vec<Vec<KeyPhrase>>) -> Self {
        self.key_phrases = per_call;
        self
    }

    pub fn with_entities(mut self, per_call: Vec<Vec<DetectedEntity>>) -> Self {
        self.entities = per_call;
        self
    }

    /// Fails the key phrase call with this 0-based index.
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn key_phrase_calls(&self) -> usize {
        self.key_phrase_calls.load(Ordering::SeqCst)
    }

    pub fn entity_calls(&self) -> usize {
        self.entity_calls.load(Ordering::SeqCst)
    }

    pub fn seen_languages(&self) -> Vec<String> {
        self.seen_languages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Annotator for ScriptedAnnotator {
    async fn detect_key_phrases(&self, _text: &str, language_code: &str) -> Result<Vec<KeyPhrase>> {
        let call = self.key_phrase_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_languages
            .lock()
            .unwrap()
            .push(language_code.to_string());
        if self.fail_on_call == Some(call) {
            return Err(PipelineError::annotation("ThrottlingException"));
        }
        Ok(self.key_phrases.get(call).cloned().unwrap_or_default())
    }

    async fn detect_entities(
        &self,
        _text: &str,
        _language_code: &str,
    ) -> Result<Vec<DetectedEntity>> {
        let call = self.entity_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entities.get(call).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct RecordingIndex {
    documents: Mutex<Vec<SearchDocument>>,
    reject_writes: bool,
}

impl RecordingIndex {
    pub fn rejecting() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            reject_writes: true,
        }
    }

    pub fn documents(&self) -> Vec<SearchDocument> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndex for RecordingIndex {
    async fn index_document(&self, document: &SearchDocument) -> Result<IndexReceipt> {
        if self.reject_writes {
            return Err(PipelineError::index_write("index request failed with status 400"));
        }

        let mut documents = self.documents.lock().unwrap();
        documents.push(document.clone());
        Ok(IndexReceipt {
            index: "resume".to_string(),
            document_id: format!("doc-{}", documents.len()),
            result: "created".to_string(),
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.reject_writes)
    }
}
