use super::{Credentials, PageFetcher, Session, SessionProvider};
use crate::domain::Period;
use crate::error::{PullError, Result};
use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::Client;
use tracing::{debug, info, warn};

pub struct NflClient {
    client: Client,
    login_host: String,
}

impl NflClient {
    pub fn new(client: Client, login_host: impl Into<String>) -> Self {
        Self {
            client,
            login_host: login_host.into(),
        }
    }
}

#[async_trait]
impl SessionProvider for NflClient {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let url = format!("https://{}/fans/login", self.login_host);
        info!("Logging in as {}", credentials.username);

        let response = self
            .client
            .post(&url)
            .query(&[
                ("action", "/fans/login"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PullError::Login(format!("{url} returned {status}")));
        }

        let cookie = session_cookie(
            response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        );

        if cookie.is_empty() {
            return Err(PullError::Login(format!(
                "{url} did not set a session cookie"
            )));
        }

        Ok(Session { cookie })
    }
}

#[async_trait]
impl PageFetcher for NflClient {
    async fn fetch(&self, url: &str, session: &Session) -> Result<String> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(COOKIE, &session.cookie)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{url} returned {status}, treating the page as empty");
        }

        Ok(response.text().await?)
    }
}

/// Folds `Set-Cookie` values into one `Cookie` header value.
fn session_cookie<'a>(set_cookies: impl Iterator<Item = &'a str>) -> String {
    set_cookies
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Page URLs for one league on the portal.
#[derive(Debug, Clone)]
pub struct LeagueUrls {
    host: String,
    league_id: String,
}

impl LeagueUrls {
    pub fn new(host: impl Into<String>, league_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            league_id: league_id.into(),
        }
    }

    pub fn players(&self, offset: u32, period: Period) -> String {
        format!(
            "http://{}/league/{}/players?offset={}&playerStatus=all&position=0&statCategory=stats&statSeason={}&statType=weekStats&statWeek={}",
            self.host, self.league_id, offset, period.year, period.week
        )
    }

    pub fn schedule(&self, period: Period) -> String {
        format!(
            "http://{}/league/{league}/history/{}/schedule?leagueId={league}&scheduleDetail={}&scheduleType=week&standingsTab=schedule",
            self.host,
            period.year,
            period.week,
            league = self.league_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_player_listing_url() {
        let urls = LeagueUrls::new("fantasy.nfl.com", "123456");
        assert_eq!(
            urls.players(50, Period::new(2015, 3)),
            "http://fantasy.nfl.com/league/123456/players?offset=50&playerStatus=all&position=0&statCategory=stats&statSeason=2015&statType=weekStats&statWeek=3"
        );
    }

    #[test]
    fn builds_schedule_url() {
        let urls = LeagueUrls::new("fantasy.nfl.com", "123456");
        assert_eq!(
            urls.schedule(Period::new(2014, 12)),
            "http://fantasy.nfl.com/league/123456/history/2014/schedule?leagueId=123456&scheduleDetail=12&scheduleType=week&standingsTab=schedule"
        );
    }

    #[test]
    fn keeps_only_cookie_pairs() {
        let cookie = session_cookie(
            [
                "SESSION=abc; Path=/; HttpOnly",
                "remember=1; Expires=Wed, 21 Oct 2026 07:28:00 GMT",
                "garbage",
            ]
            .into_iter(),
        );
        assert_eq!(cookie, "SESSION=abc; remember=1");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "kane".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }
}
