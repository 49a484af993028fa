//! Static event taxonomy.
//!
//! Four compile-time maps from raw identifiers to [`TaxonomyEntry`]:
//!
//! - [`TRACKER_EVENTS`] — tracker-vendor event names from spreadsheet
//!   exports. `$`-prefixed names are the vendor's auto-collected events.
//! - [`APPLOG_OPERATIONS`] — API operation paths from JSON log lines.
//! - [`EVENT_NAMES`] — published-event names (the `eventName` log shape).
//! - [`LOG_MESSAGES`] — the handful of known generic log messages.
//!
//! Lookups never fail: unmapped identifiers fall back per
//! [`unknown_tracker_event`] and [`last_path_segment`].

use crate::types::{Category, TaxonomyEntry};
use phf::phf_map;

const fn e(
    desc: &'static str,
    category: Category,
    detail: &'static str,
    icon: &'static str,
) -> TaxonomyEntry {
    TaxonomyEntry::new(desc, category, detail, icon)
}

/// Tracker-vendor events (spreadsheet source).
pub static TRACKER_EVENTS: phf::Map<&'static str, TaxonomyEntry> = phf_map! {
    // Vendor auto-collected events
    "$AppLaunch" => e("App launch", Category::Auto, "Fired when the user opens the app", "🚀"),
    "$AppShow" => e("App foreground", Category::Auto, "App switched from background to foreground", "👀"),
    "$AppHide" => e("App background", Category::Auto, "App switched from foreground to background", "🌙"),
    "$ViewScreen" => e("Page view", Category::Auto, "Fired when the user views a page", "📄"),
    "$Share" => e("Share", Category::Auto, "Fired when the user taps share", "📤"),
    "$Click" => e("Element click", Category::Auto, "Fired when the user taps a page element", "👆"),
    "$AddFavorites" => e("Add to favorites", Category::Auto, "Fired when the user favorites the app", "⭐"),
    "$PageLeave" => e("Page leave", Category::Auto, "Fired when the user leaves the current page", "🚪"),

    // Bookshop
    "BookTile_Click" => e("Bookshop book click", Category::Custom, "Book tapped on the bookshop page", "📖"),
    "SearchBar_Click" => e("Bookshop search bar click", Category::Search, "Search bar tapped on the bookshop page", "🔍"),

    // Search
    "Search_ButtonClick" => e("Search button click", Category::Search, "Search button tapped on the search page", "🔍"),
    "SearchResult" => e("Search results returned", Category::Search, "Search API returned results", "📋"),
    "SearchPage_Click" => e("Search result click", Category::Search, "Book tapped on the search results page", "📖"),

    // Reader
    "Reader_View" => e("Reader entered", Category::Read, "User entered the reader page", "📖"),
    "Reader_Leave" => e("Reader left", Category::Read, "User left the reader page", "🚪"),
    "Reader_ButtonClick" => e("Reader button click", Category::Read, "Button tapped on the reader page", "👆").with_tooltip(),
    "Reader_UnlockResult" => e("Chapter unlock result", Category::Read, "Result of a chapter unlock attempt", "🔓").with_tooltip(),
    "Reader_LoadFail" => e("Reader load failure", Category::Read, "Reader page failed to load", "⚠️"),

    // Payment / membership
    "MemberPopup_Exposure" => e("Membership popup shown", Category::Pay, "Membership purchase popup displayed", "💳").pay(),
    "Member_SubmitOrder" => e("Membership order submitted", Category::Pay, "User submitted a membership order", "📝").pay(),
    "Pay_Process" => e("Payment flow step", Category::Pay, "One step of the payment flow", "💰").pay(),
    "RechargeCenter_View" => e("Recharge center view", Category::Pay, "User entered the recharge center", "💰").pay(),
    "RechargeCenter_Click" => e("Recharge center click", Category::Pay, "Product tapped in the recharge center", "👆").pay(),
    "Recharge_SubmitOrder" => e("Recharge order submitted", Category::Pay, "User submitted a recharge order", "📝").pay(),
    "Recharge_PayResult" => e("Recharge payment result", Category::Pay, "Recharge payment result callback", "📥").pay(),
    "VIP_Purchase" => e("VIP purchase", Category::Pay, "VIP purchase event", "👑").pay(),
    "UnlockChapter_Pay" => e("Paid chapter unlock", Category::Pay, "Chapter unlocked with payment", "🔓").pay(),

    // Promotion channels
    "Channel_View" => e("Channel visit", Category::Channel, "Entered via a promotion channel link", "🎯"),
    "Channel_Login" => e("Channel login", Category::Channel, "Login after entering via a promotion channel", "🔐"),
};

/// API operations (JSON log source).
pub static APPLOG_OPERATIONS: phf::Map<&'static str, TaxonomyEntry> = phf_map! {
    // Auth
    "/api.x.Auth/Login" => e("User login", Category::System, "User logged into the app", "👤"),
    "/api.x.Auth/GetUserInfo" => e("Get user info", Category::System, "Fetch the current user's profile", "👤"),

    // Books
    "/api.x.Book/GetBookInfo" => e("Get book info", Category::Read, "Fetch book detail information", "📖"),
    "/api.x.Book/GetChapterList" => e("Get chapter list", Category::Read, "Fetch the book's table of contents", "📑"),
    "/api.x.Book/GetChapterContent" => e("Get chapter content", Category::Read, "Fetch a chapter's text", "📖"),
    "/api.x.Book/SetReadProgress" => e("Set read progress", Category::Read, "Persist the user's reading position", "📖"),
    "/api.x.Book/GetBookChapter" => e("Get chapter", Category::Read, "Fetch chapter detail", "📖"),
    "/api.x.Book/GetBook" => e("Get book", Category::Read, "Fetch book detail", "📖"),
    "/api.x.Bookshop/ListRecommendedBooks" => e("List recommended books", Category::Read, "Fetch recommended books", "📖"),
    "/api.x.Bookshop/ListMoreBooks" => e("List home books", Category::Read, "Fetch the home page book list", "📖"),
    "/api.x.Bookshop/GetRecentlyReadBook" => e("Recently read", Category::Read, "Fetch the most recently read book", "📖"),
    "/api.x.Book/UnlockBookIaa" => e("Ad-supported unlock", Category::Ad, "Unlock chapters by watching an ad", "🔓").with_tooltip(),
    "/api.x.Book/UnlockBookIap" => e("Paid unlock", Category::Pay, "Unlock chapters with a purchase", "💰").with_tooltip(),
    "/api.x.Book/AddToBookshelf" => e("Add to bookshelf", Category::Custom, "Add a book to the user's shelf", "📚"),

    // Ads
    "/api.x.Ad/GetUserAdFree" => e("Get ad-free status", Category::Ad, "Check whether the user has ad-free privileges", "🎫"),
    "/api.x.Ad/GetAdConfig" => e("Get ad config", Category::Ad, "Fetch ad slot configuration", "⚙️"),

    // Reporting
    "/api.x.Report/ReportAdWatchHistory" => e("Report ad watch", Category::Ad, "Report an ad watch record", "📊").with_tooltip(),
    "/api.x.Report/ReportActivation" => e("Report activation", Category::Channel, "Report a user activation event", "🎯"),
    "/api.x.Report/ReportAnalysis" => e("Report analytics", Category::Custom, "Report tracking analytics data", "📈"),
    "/api.x.Report/GetServerTime" => e("Server time", Category::System, "Fetch server time to calibrate the client clock", "🕒"),

    // Home / bookshop
    "/api.x.Home/GetHomeData" => e("Get home data", Category::Custom, "Fetch bookshop home recommendations", "🏠"),
    "/api.x.Home/GetBannerList" => e("Get banners", Category::Custom, "Fetch the home carousel banners", "🎠"),
    "/api.x.Home/GetBookList" => e("Get book list", Category::Custom, "Fetch a book list", "📚"),
    "/api.x.Bookshelf/GetBookshelfRecords" => e("Bookshelf records", Category::Custom, "Fetch bookshelf records", "📚"),

    // Search
    "/api.x.Search/SearchBook" => e("Search books", Category::Search, "Search books by keyword", "🔍"),
    "/api.x.Search/GetHotKeywords" => e("Hot keywords", Category::Search, "Fetch trending search keywords", "🔥"),

    // Orders / payment
    "/api.x.Order/CreateOrder" => e("Create order", Category::Pay, "Create a payment order", "📝").with_tooltip(),
    "/api.x.Order/GetOrderStatus" => e("Get order status", Category::Pay, "Poll an order's payment status", "🔄"),
    "/api.x.Order/GetOrderList" => e("Get order list", Category::Pay, "Fetch the user's order history", "📋"),

    // Config
    "/api.x.Config/GetAppConfig" => e("Get app config", Category::System, "Fetch app configuration", "⚙️"),
};

/// Published-event names (the `eventName` log shape).
pub static EVENT_NAMES: phf::Map<&'static str, TaxonomyEntry> = phf_map! {
    "ad_watch_start" => e("Ad watch started", Category::Ad, "User started watching a rewarded ad", "▶️"),
    "ad_watch_end" => e("Ad watch finished", Category::Ad, "User finished watching a rewarded ad", "⏹️"),
    "user_register" => e("User registered", Category::System, "User registration event", "👤"),
    "user_login" => e("User logged in", Category::System, "User login event", "🔐"),
    "book_unlock" => e("Book unlocked", Category::Read, "Chapter unlock event", "🔓"),
    "analysis_generic" => e("Analytics reported", Category::Custom, "Generic analytics report", "📈"),
};

/// Known generic log messages (the `msg` log shape).
pub static LOG_MESSAGES: phf::Map<&'static str, TaxonomyEntry> = phf_map! {
    "request log" => e("API request log", Category::Api, "Inbound API request", "🌐"),
    "publish event" => e("Event published", Category::System, "Event published to the bus", "📤"),
};

/// Payment-flow step names, used by the tracker detail extractor.
pub static PAY_PROCESS_TYPES: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "create_order" => ("Create order", "📝"),
    "pay_poll_request_start" => ("Poll request started", "🔄"),
    "pay_poll_request_result" => ("Poll request result", "📥"),
    "request_pay" => ("Request payment", "📤"),
    "pay_callback" => ("Payment callback", "📥"),
    "pay_success" => ("Payment succeeded", "✅"),
    "pay_fail" => ("Payment failed or cancelled", "❌"),
    "pay_complete" => ("Payment flow finished", "🏁"),
    "pay_cancel" => ("Payment cancelled", "🚫"),
    "verify_order" => ("Verify order", "🔍"),
};

/// Payment-flow statuses, used by the tracker detail extractor.
pub static PAY_PROCESS_STATUS: phf::Map<&'static str, (&'static str, &'static str)> = phf_map! {
    "start" => ("Payment started", "🚀"),
    "request" => ("Request sent", "📤"),
    "success" => ("Payment succeeded", "✅"),
    "fail" => ("Payment failed", "❌"),
    "cancel" => ("Payment cancelled", "🚫"),
    "complete" => ("Flow complete", "🏁"),
    "error" => ("Error occurred", "⚠️"),
};

/// Fallback for tracker events missing from [`TRACKER_EVENTS`]:
/// `$`-prefixed names are vendor auto-collected, everything else custom.
pub fn unknown_tracker_event(name: &str) -> TaxonomyEntry {
    let category = if name.starts_with('$') { Category::Auto } else { Category::Custom };
    TaxonomyEntry::new("unknown event", category, "no description", "📋")
}

/// Last segment of an operation path; fallback description for operations
/// missing from [`APPLOG_OPERATIONS`].
pub fn last_path_segment(path: &str) -> &str {
    path.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown operation")
}
