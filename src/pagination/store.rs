//! Pagination sessions keyed by an opaque token.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use log::debug;
use uuid::Uuid;

use crate::{
    gateway::Game,
    pagination::{Direction, StateError},
};

/// What a session browses, used to title its pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    /// Games of one NFL week
    Week(i64),
    /// Schedule of one team
    Team(String),
}

/// The game under a session cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub token: String,
    pub view: PageView,
    pub game: Game,
    /// Zero-based position of `game`
    pub index: usize,
    pub total: usize,
}

struct Session {
    /// Games in display order, never modified after opening
    games: Vec<Game>,
    view: PageView,
    cursor: usize,
    created_at: Instant,
    last_access: Instant,
}

impl Session {
    fn page(&self, token: &str) -> Option<Page> {
        self.games.get(self.cursor).map(|game| Page {
            token: token.to_owned(),
            view: self.view.clone(),
            game: game.clone(),
            index: self.cursor,
            total: self.games.len(),
        })
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_access) >= ttl
    }
}

/// Store of browsing sessions.
///
/// Each session keeps its own cursor, moved atomically under the store lock.
/// Sessions idle for longer than the TTL are dropped, and opening a session in
/// a full store evicts the least recently used one.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    /// Idle time after which a session expires
    ttl: Duration,
    /// Upper bound on live sessions
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        SessionStore {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Opens a session on `games` and returns its first page.
    ///
    /// The page carries the minted token. Later pages are read through
    /// [`SessionStore::advance`], which fails with
    /// [`StateError::SessionNotFound`] once the token is unknown or expired.
    ///
    /// Returns `None` for an empty list, in which case no session is created.
    pub fn open(&self, games: Vec<Game>, view: PageView) -> Option<Page> {
        if games.is_empty() {
            return None;
        }

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        sessions.retain(|token, session| {
            let expired = session.is_expired(now, self.ttl);
            if expired {
                debug!(
                    "session {} expired after {:?}",
                    token,
                    now.duration_since(session.created_at)
                );
            }
            !expired
        });

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_access)
                .map(|(token, _)| token.clone());
            match oldest {
                Some(token) => {
                    debug!("session {} evicted", token);
                    sessions.remove(&token);
                }
                None => break,
            }
        }

        let token = Uuid::new_v4().to_string();
        let session = Session {
            games,
            view,
            cursor: 0,
            created_at: now,
            last_access: now,
        };
        let page = session.page(&token);
        sessions.insert(token.clone(), session);

        debug!("session {} opened", token);

        page
    }

    /// Page under the cursor of session `token`.
    #[cfg(test)]
    pub fn get(&self, token: &str) -> Result<Page, StateError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = Self::live_session(&mut sessions, token, self.ttl)?;

        session.page(token).ok_or(StateError::OutOfRange)
    }

    /// Moves the cursor of session `token` one step in `direction`.
    ///
    /// This is the lookup by token of a live session: an unknown or expired
    /// token yields [`StateError::SessionNotFound`]. A move past either end is
    /// rejected with [`StateError::OutOfRange`] and leaves the cursor unchanged.
    pub fn advance(&self, token: &str, direction: Direction) -> Result<Page, StateError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = Self::live_session(&mut sessions, token, self.ttl)?;

        let cursor = direction
            .step(session.cursor, session.games.len())
            .ok_or(StateError::OutOfRange)?;
        session.cursor = cursor;

        debug!("session {} moved to {}", token, cursor);

        session.page(token).ok_or(StateError::OutOfRange)
    }

    /// Looks up a session, dropping it when expired, and marks it as used.
    fn live_session<'a>(
        sessions: &'a mut HashMap<String, Session>,
        token: &str,
        ttl: Duration,
    ) -> Result<&'a mut Session, StateError> {
        let now = Instant::now();

        let expired = sessions
            .get(token)
            .map(|session| session.is_expired(now, ttl))
            .ok_or(StateError::SessionNotFound)?;
        if expired {
            debug!("session {} expired", token);
            sessions.remove(token);
            return Err(StateError::SessionNotFound);
        }

        let session = sessions
            .get_mut(token)
            .ok_or(StateError::SessionNotFound)?;
        session.last_access = now;

        Ok(session)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn games(count: i64) -> Vec<Game> {
        (1..=count)
            .map(|id| Game {
                id,
                home_team: format!("Home {}", id),
                away_team: format!("Away {}", id),
                commence_time: None,
                home_odds: 1.5,
                away_odds: 2.5,
            })
            .collect()
    }

    #[test]
    fn test_open_returns_first_page() {
        let store = SessionStore::new(Duration::from_secs(60), 10);

        let page = store.open(games(3), PageView::Week(1)).unwrap();

        assert_eq!(page.index, 0);
        assert_eq!(page.total, 3);
        assert_eq!(page.game.id, 1);
        assert_eq!(page.view, PageView::Week(1));
        assert_eq!(store.get(&page.token).unwrap(), page);
    }

    #[test]
    fn test_open_empty_list() {
        let store = SessionStore::new(Duration::from_secs(60), 10);

        assert!(store.open(Vec::new(), PageView::Week(1)).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new(Duration::from_secs(60), 10);

        let first = store.open(games(1), PageView::Week(1)).unwrap();
        let second = store.open(games(1), PageView::Week(1)).unwrap();

        assert_ne!(first.token, second.token);
    }

    #[test]
    fn test_navigation_sequence() {
        let store = SessionStore::new(Duration::from_secs(60), 10);
        let token = store
            .open(games(3), PageView::Team("Chiefs".to_owned()))
            .unwrap()
            .token;

        assert_eq!(
            store.advance(&token, Direction::Previous),
            Err(StateError::OutOfRange)
        );
        assert_eq!(store.get(&token).unwrap().index, 0);

        assert_eq!(store.advance(&token, Direction::Next).unwrap().index, 1);
        let page = store.advance(&token, Direction::Next).unwrap();
        assert_eq!(page.index, 2);
        assert_eq!(page.game.id, 3);

        assert_eq!(
            store.advance(&token, Direction::Next),
            Err(StateError::OutOfRange)
        );
        assert_eq!(store.get(&token).unwrap().index, 2);

        assert_eq!(store.advance(&token, Direction::Previous).unwrap().index, 1);
    }

    #[test]
    fn test_unknown_token() {
        let store = SessionStore::new(Duration::from_secs(60), 10);

        assert_eq!(
            store.advance("missing", Direction::Next),
            Err(StateError::SessionNotFound)
        );
        assert_eq!(store.get("missing"), Err(StateError::SessionNotFound));
    }

    #[test]
    fn test_expired_session() {
        let store = SessionStore::new(Duration::ZERO, 10);
        let token = store.open(games(2), PageView::Week(1)).unwrap().token;

        assert_eq!(
            store.advance(&token, Direction::Next),
            Err(StateError::SessionNotFound)
        );
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let store = SessionStore::new(Duration::from_secs(60), 2);

        let first = store.open(games(2), PageView::Week(1)).unwrap().token;
        thread::sleep(Duration::from_millis(2));
        let second = store.open(games(2), PageView::Week(2)).unwrap().token;
        thread::sleep(Duration::from_millis(2));

        // Touch the first session so the second becomes the oldest
        store.get(&first).unwrap();
        thread::sleep(Duration::from_millis(2));

        let third = store.open(games(2), PageView::Week(3)).unwrap().token;

        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_ok());
        assert_eq!(store.get(&second), Err(StateError::SessionNotFound));
        assert!(store.get(&third).is_ok());
    }
}
