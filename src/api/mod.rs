//! Descriptor builders for the farm backend's REST endpoints.
//!
//! Every method returns a [`Descriptor`]; nothing touches the network until
//! the gateway runs it.

mod auth;
mod machines;
mod ponds;
mod records;
mod schedules;
mod sensors;

use serde::Serialize;

use crate::adapter::HttpAdapter;
use crate::gateway::Descriptor;

pub(crate) type Query = Vec<(&'static str, String)>;

#[derive(Clone)]
pub struct Api {
    adapter: HttpAdapter,
}

impl Api {
    pub fn new(adapter: HttpAdapter) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &HttpAdapter {
        &self.adapter
    }

    fn get(&self, label: &'static str, path: String, query: Query) -> Descriptor {
        let adapter = self.adapter.clone();
        Descriptor::new(move || async move { adapter.get(&path, &query).await }).labelled(label)
    }

    fn delete(&self, label: &'static str, path: String) -> Descriptor {
        let adapter = self.adapter.clone();
        Descriptor::new(move || async move { adapter.delete(&path).await }).labelled(label)
    }

    fn post<B>(&self, label: &'static str, path: String, body: B) -> Descriptor
    where
        B: Serialize + Send + Sync + 'static,
    {
        let adapter = self.adapter.clone();
        Descriptor::new(move || async move { adapter.post(&path, &body).await }).labelled(label)
    }

    fn put<B>(&self, label: &'static str, path: String, body: B) -> Descriptor
    where
        B: Serialize + Send + Sync + 'static,
    {
        let adapter = self.adapter.clone();
        Descriptor::new(move || async move { adapter.put(&path, &body).await }).labelled(label)
    }
}

fn pond_query(pond_id: &str) -> Query {
    vec![("pondId", pond_id.to_string())]
}
