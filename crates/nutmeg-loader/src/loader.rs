//! Concurrent loading of the featured list and every town file.
//!
//! Each resource is fetched independently. Any failure degrades that one
//! resource to "no restaurants" and is logged; [`DirectoryLoader::load`]
//! itself never fails.

use std::time::Duration;

use futures::future::join_all;
use nutmeg_core::{AppConfig, FeaturedEntry, Restaurant, TownCategories, TownSource, TownsFile};
use reqwest::Client;

use crate::error::LoaderError;
use crate::normalize::{parse_featured_file, parse_town_file, TownListing};
use crate::retry::retry_with_backoff;
use crate::source::{is_absolute_url, DataRoot};

/// The merged result of one load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedDirectory {
    pub featured: Vec<FeaturedEntry>,
    /// Featured shelves carried by town files, in configured town order.
    pub town_featured: Vec<FeaturedEntry>,
    /// Town files in configured order, then record order within each file.
    pub restaurants: Vec<Restaurant>,
    pub categories: Vec<TownCategories>,
}

/// Fetches directory resources from a [`DataRoot`].
pub struct DirectoryLoader {
    client: Client,
    root: DataRoot,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl DirectoryLoader {
    /// Creates a loader with the given request timeout, `User-Agent`, and
    /// retry policy. `max_retries = 0` disables retries.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidRoot`] if `root` cannot be interpreted,
    /// or [`LoaderError::Http`] if the HTTP client cannot be constructed.
    pub fn new(
        root: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, LoaderError> {
        let root = DataRoot::parse(root)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            root,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Creates a loader from application configuration.
    ///
    /// # Errors
    ///
    /// See [`DirectoryLoader::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, LoaderError> {
        Self::new(
            &config.data_root,
            config.request_timeout_secs,
            &config.user_agent,
            config.fetch_max_retries,
            config.fetch_retry_backoff_ms,
        )
    }

    #[must_use]
    pub fn root(&self) -> &DataRoot {
        &self.root
    }

    /// Load the featured list and all town files concurrently.
    ///
    /// Never fails: unreachable or malformed resources contribute nothing.
    pub async fn load(&self, sources: &TownsFile) -> LoadedDirectory {
        let featured_fut = self.load_featured_or_empty(&sources.featured);
        let towns_fut = join_all(sources.towns.iter().map(|t| self.load_town_or_empty(t)));

        let (featured, towns) = futures::join!(featured_fut, towns_fut);

        let mut town_featured = Vec::new();
        let mut restaurants = Vec::new();
        let mut categories = Vec::with_capacity(towns.len());
        for listing in towns {
            town_featured.extend(listing.featured);
            restaurants.extend(listing.restaurants);
            categories.push(TownCategories {
                town: listing.town,
                categories: listing.categories,
            });
        }

        tracing::info!(
            featured = featured.len(),
            town_featured = town_featured.len(),
            restaurants = restaurants.len(),
            towns = categories.len(),
            "directory loaded"
        );

        LoadedDirectory {
            featured,
            town_featured,
            restaurants,
            categories,
        }
    }

    /// Fetch and parse the featured list.
    ///
    /// # Errors
    ///
    /// Returns a [`LoaderError`] if the resource cannot be fetched or parsed.
    pub async fn load_featured(&self, resource: &str) -> Result<Vec<FeaturedEntry>, LoaderError> {
        let body = self.fetch_resource(resource).await?;
        parse_featured_file(&body)
    }

    /// Fetch and parse one town file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoaderError`] if the resource cannot be fetched or parsed.
    pub async fn load_town(&self, source: &TownSource) -> Result<TownListing, LoaderError> {
        let body = self.fetch_resource(&source.file).await?;
        let listing = parse_town_file(&body, &source.town)?;
        tracing::debug!(
            town = %source.town,
            file = %source.file,
            featured = listing.featured.len(),
            restaurants = listing.restaurants.len(),
            "town file loaded"
        );
        Ok(listing)
    }

    async fn load_featured_or_empty(&self, resource: &str) -> Vec<FeaturedEntry> {
        match self.load_featured(resource).await {
            Ok(featured) => featured,
            Err(err) => {
                tracing::warn!(
                    resource = %self.root.locate(resource),
                    error = %err,
                    "could not load featured list; continuing without it"
                );
                Vec::new()
            }
        }
    }

    async fn load_town_or_empty(&self, source: &TownSource) -> TownListing {
        match self.load_town(source).await {
            Ok(listing) => listing,
            Err(err) => {
                tracing::warn!(
                    town = %source.town,
                    resource = %self.root.locate(&source.file),
                    error = %err,
                    "no data for town; continuing without it"
                );
                TownListing {
                    town: source.town.clone(),
                    ..TownListing::default()
                }
            }
        }
    }

    /// Read a resource body from the data root.
    ///
    /// # Errors
    ///
    /// - [`LoaderError::NotFound`]: HTTP 404 (not retried).
    /// - [`LoaderError::UnexpectedStatus`]: any other non-2xx (429/5xx retried).
    /// - [`LoaderError::Http`]: network failure after retries.
    /// - [`LoaderError::Io`]: local file missing or unreadable.
    pub async fn fetch_resource(&self, resource: &str) -> Result<String, LoaderError> {
        let location = self.root.locate(resource);
        match &self.root {
            DataRoot::Dir(_) if !is_absolute_url(resource) => {
                tokio::fs::read_to_string(&location)
                    .await
                    .map_err(|source| LoaderError::Io {
                        path: location,
                        source,
                    })
            }
            _ => self.fetch_http(&location).await,
        }
    }

    async fn fetch_http(&self, url: &str) -> Result<String, LoaderError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(LoaderError::NotFound {
                    url: url.to_owned(),
                });
            }
            if !status.is_success() {
                return Err(LoaderError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}
