//! SQLite road store (feature `sqlite`).
//!
//! Roads live in a single `roads` table; geometry is WKT text and lengths are
//! `;`-separated text.  Listing order is insertion order (`rowid`), and an
//! update keeps a road's position, so rebuilds after an edit snap
//! intersections the same way as before.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use tracing::warn;

use rn_core::RoadId;
use rn_engine::RoadSource;
use rn_spatial::RoadRecord;

use crate::polyline::{lengths_to_text, parse_lengths, parse_polyline, to_wkt};
use crate::{SourceError, SourceResult};

/// A [`RoadSource`] backed by an SQLite database.
pub struct SqliteRoadStore {
    conn: Connection,
}

impl SqliteRoadStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> SourceResult<Self> {
        Self::init(Connection::open(path)?)
    }

    /// A private in-memory database.
    pub fn in_memory() -> SourceResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> SourceResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS roads (
                 id        TEXT    PRIMARY KEY,
                 name      TEXT,
                 geometry  TEXT    NOT NULL,
                 length_m  TEXT,
                 is_oneway INTEGER NOT NULL DEFAULT 0
             );",
        )?;
        Ok(Self { conn })
    }

    /// Insert a road or update the stored road with the same id.
    pub fn upsert(&self, road: &RoadRecord, name: Option<&str>) -> SourceResult<()> {
        let lengths = road.segment_lengths_m.as_deref().map(lengths_to_text);
        self.conn.execute(
            "INSERT INTO roads (id, name, geometry, length_m, is_oneway) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(id) DO UPDATE SET \
                 name = excluded.name, \
                 geometry = excluded.geometry, \
                 length_m = excluded.length_m, \
                 is_oneway = excluded.is_oneway",
            rusqlite::params![
                road.id.as_str(),
                name,
                to_wkt(&road.coordinates),
                lengths,
                road.is_oneway as i64,
            ],
        )?;
        Ok(())
    }

    /// Insert many roads in one transaction.
    pub fn upsert_all<'a, I>(&mut self, roads: I) -> SourceResult<()>
    where
        I: IntoIterator<Item = (&'a RoadRecord, Option<&'a str>)>,
    {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO roads (id, name, geometry, length_m, is_oneway) \
                 VALUES (?1, ?2, ?3, ?4, ?5) \
                 ON CONFLICT(id) DO UPDATE SET \
                     name = excluded.name, \
                     geometry = excluded.geometry, \
                     length_m = excluded.length_m, \
                     is_oneway = excluded.is_oneway",
            )?;
            for (road, name) in roads {
                stmt.execute(rusqlite::params![
                    road.id.as_str(),
                    name,
                    to_wkt(&road.coordinates),
                    road.segment_lengths_m.as_deref().map(lengths_to_text),
                    road.is_oneway as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete a road.  Returns `false` if no road had that id.
    pub fn delete(&self, id: &RoadId) -> SourceResult<bool> {
        let n = self.conn.execute("DELETE FROM roads WHERE id = ?1", [id.as_str()])?;
        Ok(n > 0)
    }

    pub fn count(&self) -> SourceResult<usize> {
        let n: i64 = self.conn.query_row("SELECT COUNT(*) FROM roads", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl RoadSource for SqliteRoadStore {
    type Error = SourceError;

    fn list_roads(&self) -> SourceResult<Vec<RoadRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, geometry, length_m, is_oneway FROM roads ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;

        let mut roads = Vec::new();
        for row in rows {
            let (id, geometry, lengths, is_oneway) = row?;
            let parsed = parse_polyline(&geometry).and_then(|coordinates| {
                let lengths = lengths.as_deref().map(parse_lengths).transpose()?.flatten();
                Ok((coordinates, lengths))
            });
            match parsed {
                Ok((coordinates, lengths)) => {
                    let mut road = RoadRecord::new(id, coordinates, is_oneway != 0);
                    road.segment_lengths_m = lengths;
                    roads.push(road);
                }
                Err(e) => warn!(road = %id, error = %e, "skipping unreadable road row"),
            }
        }
        Ok(roads)
    }

    fn road_name(&self, id: &RoadId) -> Option<String> {
        self.conn
            .query_row("SELECT name FROM roads WHERE id = ?1", [id.as_str()], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()
            .unwrap_or_else(|e| {
                warn!(road = %id, error = %e, "road name lookup failed");
                None
            })
            .flatten()
    }
}
