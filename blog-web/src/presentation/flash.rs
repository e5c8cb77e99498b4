use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

const FLASH_COOKIE: &str = "flash";

/// One-shot message shown on the page a redirect lands on.
///
/// Only the code travels in the cookie; the text stays server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flash {
    AlreadyRegistered,
    UnknownEmail,
    WrongPassword,
    LoginRequired,
    LoginToViewPosts,
    EmptyComment,
    DuplicateTitle,
}

impl Flash {
    const ALL: [Flash; 7] = [
        Flash::AlreadyRegistered,
        Flash::UnknownEmail,
        Flash::WrongPassword,
        Flash::LoginRequired,
        Flash::LoginToViewPosts,
        Flash::EmptyComment,
        Flash::DuplicateTitle,
    ];

    fn code(self) -> &'static str {
        match self {
            Flash::AlreadyRegistered => "already_registered",
            Flash::UnknownEmail => "unknown_email",
            Flash::WrongPassword => "wrong_password",
            Flash::LoginRequired => "login_required",
            Flash::LoginToViewPosts => "login_to_view_posts",
            Flash::EmptyComment => "empty_comment",
            Flash::DuplicateTitle => "duplicate_title",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.code() == code)
    }

    pub(crate) fn message(self) -> &'static str {
        match self {
            Flash::AlreadyRegistered => "You've already signed up with that email. Log in, instead.",
            Flash::UnknownEmail => "That email does not exist, please try again.",
            Flash::WrongPassword => "Password incorrect, please try again.",
            Flash::LoginRequired => "Please log in first.",
            Flash::LoginToViewPosts => "Please login to view posts.",
            Flash::EmptyComment => "A comment needs some text.",
            Flash::DuplicateTitle => "A post with that title already exists.",
        }
    }
}

pub(crate) fn set_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Reads the pending flash and clears it so it renders once.
pub(crate) fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(code) = jar.get(FLASH_COOKIE).map(|cookie| cookie.value().to_owned()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/"));
    (jar, Flash::from_code(&code))
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};
    use axum_extra::extract::cookie::CookieJar;

    use super::{Flash, set_flash, take_flash};

    #[test]
    fn every_flash_survives_its_code() {
        for flash in Flash::ALL {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
        assert_eq!(Flash::from_code("bogus"), None);
    }

    #[test]
    fn set_flash_writes_the_code() {
        let jar = set_flash(CookieJar::new(), Flash::WrongPassword);
        let cookie = jar.get("flash").expect("flash cookie");
        assert_eq!(cookie.value(), "wrong_password");
    }

    #[test]
    fn take_flash_reads_incoming_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("flash=unknown_email"),
        );
        let jar = CookieJar::from_headers(&headers);

        let (jar, flash) = take_flash(jar);
        assert_eq!(flash, Some(Flash::UnknownEmail));
        assert!(jar.get("flash").is_none());
    }
}
