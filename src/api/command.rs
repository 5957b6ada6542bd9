//! AJAX command URLs.

use url::Url;

use crate::media::MediaKind;

/// A command understood by the site's AJAX endpoint.
#[derive(Debug, Clone, Copy)]
pub enum Command<'a> {
    Login {
        email: &'a str,
        password: &'a str,
        ltoken: &'a str,
    },
    ProfilePhotos {
        nick: &'a str,
        token: &'a str,
    },
    ProfileVideos {
        nick: &'a str,
        token: &'a str,
    },
    ItemInfo {
        kind: MediaKind,
        data: &'a str,
        ldata: &'a str,
        token: &'a str,
    },
}

impl Command<'_> {
    /// Value of the `command` query parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::ProfilePhotos { .. } => "getProfilePhotos",
            Command::ProfileVideos { .. } => "getProfileVideos",
            Command::ItemInfo { .. } => "getItemInfo",
        }
    }

    /// Query parameters following `command`, in wire order.
    fn params(&self) -> Vec<(&'static str, String)> {
        match *self {
            Command::Login {
                email,
                password,
                ltoken,
            } => vec![
                ("email", email.to_string()),
                ("password", password.to_string()),
                ("ltoken", ltoken.to_string()),
            ],
            Command::ProfilePhotos { nick, token } => vec![
                ("nick", nick.to_string()),
                ("actPath", format!("/{}/photos", nick)),
                ("token", token.to_string()),
            ],
            Command::ProfileVideos { nick, token } => vec![
                ("nick", nick.to_string()),
                ("actPath", format!("/{}/videos", nick)),
                ("token", token.to_string()),
            ],
            Command::ItemInfo {
                kind,
                data,
                ldata,
                token,
            } => vec![
                ("data", data.to_string()),
                ("actPath", format!("/{}/{}", kind, ldata)),
                ("token", token.to_string()),
            ],
        }
    }

    /// Full request URL against `base`. Every value is form-encoded.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("command", self.name());
            for (key, value) in self.params() {
                query.append_pair(key, &value);
            }
        }
        url
    }
}

/// URL safe to log: the session token and password are masked.
pub fn redact(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "token" || k == "password" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if !pairs.is_empty() {
        masked.query_pairs_mut().clear().extend_pairs(pairs);
    }
    masked.to_string()
}
