use std::{collections::HashMap, sync::RwLock};

use serde::{Deserialize, Serialize};

use crate::{MemoService, Result};
use jot_storage::queries;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
	pub latitude: f64,
	pub longitude: f64,
	#[serde(default)]
	pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
	pub latitude: f64,
	pub longitude: f64,
	pub label: Option<String>,
	pub memo_numbers: Vec<i64>,
}

/// Explicitly owned marker cache, injected into the service at
/// construction. Written rarely (and only by the owning service), read on
/// every map request.
#[derive(Debug, Default)]
pub struct MarkerCache {
	inner: RwLock<Option<Vec<MapMarker>>>,
}
impl MarkerCache {
	pub fn new() -> Self {
		Self { inner: RwLock::new(None) }
	}

	pub fn get(&self) -> Option<Vec<MapMarker>> {
		self.inner.read().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn set(&self, markers: Vec<MapMarker>) {
		*self.inner.write().unwrap_or_else(|err| err.into_inner()) = Some(markers);
	}

	pub fn clear(&self) {
		*self.inner.write().unwrap_or_else(|err| err.into_inner()) = None;
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationsResponse {
	pub markers: Vec<MapMarker>,
}

impl MemoService {
	/// Map markers grouped by exact coordinate over active public memos,
	/// served from the cache when warm.
	pub async fn locations(&self) -> LocationsResponse {
		if let Some(markers) = self.markers().get() {
			return LocationsResponse { markers };
		}

		match self.locations_inner().await {
			Ok(markers) => LocationsResponse { markers },
			Err(err) => {
				tracing::warn!("Location lookup failed; returning an empty result: {err}.");

				LocationsResponse { markers: Vec::new() }
			},
		}
	}

	async fn locations_inner(&self) -> Result<Vec<MapMarker>> {
		let rows = queries::with_locations(&self.db).await?;
		let memos: Vec<(i64, Vec<GeoPoint>)> = rows
			.into_iter()
			.map(|row| {
				(row.memo_number, serde_json::from_value(row.locations).unwrap_or_default())
			})
			.collect();
		let markers = group_markers(&memos);

		self.markers().set(markers.clone());

		Ok(markers)
	}
}

/// Group points by exact coordinate. The first label seen for a coordinate
/// wins; each memo number appears at most once per marker.
pub(crate) fn group_markers(memos: &[(i64, Vec<GeoPoint>)]) -> Vec<MapMarker> {
	let mut index: HashMap<(u64, u64), usize> = HashMap::new();
	let mut markers: Vec<MapMarker> = Vec::new();

	for (memo_number, points) in memos {
		for point in points {
			let key = (point.latitude.to_bits(), point.longitude.to_bits());

			match index.get(&key) {
				Some(&at) => {
					let marker = &mut markers[at];

					if !marker.memo_numbers.contains(memo_number) {
						marker.memo_numbers.push(*memo_number);
					}
					if marker.label.is_none() {
						marker.label = point.label.clone();
					}
				},
				None => {
					index.insert(key, markers.len());
					markers.push(MapMarker {
						latitude: point.latitude,
						longitude: point.longitude,
						label: point.label.clone(),
						memo_numbers: vec![*memo_number],
					});
				},
			}
		}
	}

	markers
}
