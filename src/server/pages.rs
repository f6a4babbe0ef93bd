//! Static pages. Plain, unstyled HTML. The landing page at `/` links to
//! the signup form at `/signup`, which posts JSON to `/api/signups` and
//! moves to `/signup/success` on a 201.

use axum::response::Html;
use gigafter_core::types::{HOW_HEARD_OPTIONS, US_STATE_CODES};
use std::sync::LazyLock;

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | GigAfter</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

const FEATURES: &[(&str, &str)] = &[
    (
        "Smart Booking",
        "Browse and book artists with real-time availability sync. No more double bookings or scheduling conflicts.",
    ),
    (
        "Digital Contracts",
        "Send, sign, and store contracts securely in the cloud. Get legally binding signatures in minutes, not days.",
    ),
    (
        "Show Day Management",
        "Coordinate logistics and schedules in real-time. Keep everyone aligned from load-in to encore.",
    ),
    (
        "Instant Payments",
        "Process artist payments with one click. Automated invoicing, transparent fees, and fast payouts.",
    ),
];

const STEPS: &[(&str, &str)] = &[
    (
        "Discover & Book",
        "Browse local artists by genre, availability, and budget. Send booking requests with one click.",
    ),
    (
        "Sign Contracts",
        "Auto-generated contracts sent instantly. Artists sign digitally, and you get notified in real-time.",
    ),
    (
        "Coordinate Show Day",
        "Shared timelines keep load-in times, sound check and set lists in one place for your whole team.",
    ),
    (
        "Pay Instantly",
        "Pay artists with one click once the show is over. Invoices are generated for you.",
    ),
];

const PLAN_INCLUDES: &[&str] = &[
    "Smart artist booking &amp; availability sync",
    "Digital contracts with e-signatures",
    "Real-time show day coordination",
    "One-click instant payments",
    "Unlimited artists &amp; bookings",
    "Priority support",
];

/// `(quote, role, venue)`
const TESTIMONIALS: &[(&str, &str, &str)] = &[
    (
        "GigAfter cut our booking admin time by 80%. What used to take hours now takes minutes.",
        "Venue Manager",
        "The Blue Note Lounge",
    ),
    (
        "The contract management alone is worth it. No more chasing down signatures or digging through emails.",
        "Entertainment Director",
        "Riverside Music Hall",
    ),
    (
        "The show-day coordination features keep our entire team in sync and our artists happy.",
        "Operations Lead",
        "The Grand Theatre",
    ),
];

static LANDING: LazyLock<String> = LazyLock::new(|| {
    let features: String = FEATURES
        .iter()
        .map(|(title, text)| format!("  <li><h3>{title}</h3><p>{text}</p></li>\n"))
        .collect();
    let steps: String = STEPS
        .iter()
        .enumerate()
        .map(|(i, (title, text))| format!("  <li><h3>{:02}. {title}</h3><p>{text}</p></li>\n", i + 1))
        .collect();
    let includes: String = PLAN_INCLUDES
        .iter()
        .map(|item| format!("  <li>{item}</li>\n"))
        .collect();
    let quotes: String = TESTIMONIALS
        .iter()
        .map(|(quote, role, venue)| {
            format!("<blockquote><p>\"{quote}\"</p><footer>{role}, {venue}</footer></blockquote>\n")
        })
        .collect();

    let body = format!(
        r##"<header id="hero">
<p>Now accepting early access signups</p>
<h1>Everything venues need to book and run live music</h1>
<p>GigAfter helps live music venues book artists, manage contracts, coordinate show days, and handle payments in one place.</p>
<p><a href="/signup">Join the Waitlist</a> · <a href="#how-it-works">See How It Works</a></p>
</header>
<section id="features">
<h2>Everything you need to run world-class shows</h2>
<ul>
{features}</ul>
<p>GigAfter is built for venues that host live music regularly and want fewer operational headaches.</p>
</section>
<section id="how-it-works">
<h2>From booking to payment in four simple steps</h2>
<ol>
{steps}</ol>
</section>
<section id="pricing">
<h2>Lock in your founder rate</h2>
<p>Be one of the first 50 venues to join and secure early bird pricing forever.</p>
<p><strong>$30/month</strong> starting April 1, 2026. Regular price: <s>$50/month</s>. Save 40%.</p>
<ul>
{includes}</ul>
<h3>Locked-in pricing guarantee</h3>
<p>The first 50 venues are locked in at $30/month forever. After May 1, 2026, new venues pay $50/month.</p>
<h3>No charges until launch</h3>
<p>We won't charge your card until April 1, 2026.</p>
<p><a href="/signup">Join the Waitlist</a></p>
</section>
<section id="testimonials">
<h2>Loved by venue owners everywhere</h2>
{quotes}</section>
<section id="cta">
<h2>Ready to transform your venue operations?</h2>
<p>Join the waitlist today. Early members receive founder pricing and early access.</p>
<p><a href="/signup">Join the Waitlist</a></p>
<p>Free during beta. Cancel anytime.</p>
</section>
<footer>
<p>Live music booking and show management, simplified.</p>
<p><a href="mailto:hello@gigafter.com">hello@gigafter.com</a></p>
<p><a href="/privacy">Privacy Policy</a> · <a href="/terms">Terms of Service</a></p>
</footer>"##
    );
    page("Live music booking for venues", &body)
});

pub async fn landing() -> Html<&'static str> {
    Html(LANDING.as_str())
}

static SIGNUP_FORM: LazyLock<String> = LazyLock::new(|| {
    let states: String = US_STATE_CODES
        .iter()
        .map(|code| format!("<option value=\"{code}\">{code}</option>"))
        .collect();
    let sources: String = HOW_HEARD_OPTIONS
        .iter()
        .map(|opt| format!("<option value=\"{opt}\">{opt}</option>"))
        .collect();

    let body = format!(
        r#"<h1>Join the GigAfter waitlist</h1>
<p>Lock in early bird pricing for your venue.</p>
<form id="signup">
  <label>Contact name <input name="contact_name" required></label><br>
  <label>Email <input name="email" type="email" required></label><br>
  <label>Phone <input name="phone" type="tel"></label><br>
  <label>Venue name <input name="establishment_name" required></label><br>
  <label>Address <input name="address_line1" required></label><br>
  <label>Address line 2 <input name="address_line2"></label><br>
  <label>City <input name="city" required></label><br>
  <label>State <select name="state" required><option value="">Select</option>{states}</select></label><br>
  <label>Zip code <input name="zip_code" required></label><br>
  <label>How did you hear about us? <select name="how_heard_about_us"><option value="">Select</option>{sources}</select></label><br>
  <label>What would make GigAfter useful for you? <textarea name="beta_feedback"></textarea></label><br>
  <button type="submit">Join the waitlist</button>
</form>
<ul id="errors"></ul>
<p><a href="/terms">Terms of Service</a> · <a href="/privacy">Privacy Policy</a></p>
<script>
document.getElementById("signup").addEventListener("submit", async (ev) => {{
  ev.preventDefault();
  const form = Object.fromEntries(new FormData(ev.target));
  const resp = await fetch("/api/signups", {{
    method: "POST",
    headers: {{ "content-type": "application/json" }},
    body: JSON.stringify(form),
  }});
  if (resp.status === 201) {{ window.location = "/signup/success"; return; }}
  const body = await resp.json().catch(() => ({{ error: "Something went wrong. Please try again." }}));
  const list = document.getElementById("errors");
  list.innerHTML = "";
  for (const e of body.errors || [{{ message: body.error }}]) {{
    const li = document.createElement("li");
    li.textContent = e.field ? `${{e.field}}: ${{e.message}}` : e.message;
    list.appendChild(li);
  }}
}});
</script>"#
    );
    page("Join the waitlist", &body)
});

pub async fn signup_form() -> Html<&'static str> {
    Html(SIGNUP_FORM.as_str())
}

pub async fn signup_success() -> Html<String> {
    Html(page(
        "You're on the list",
        r#"<h1>You're on the list!</h1>
<p>Welcome to the GigAfter family. You've locked in our early bird pricing of $30/month forever.</p>
<h2>What happens next?</h2>
<ul>
  <li>Check your inbox: we've sent a confirmation email with more details.</li>
  <li>Mark your calendar: GigAfter launches April 1, 2026.</li>
  <li>Know other venues? Spread the word and help them save too.</li>
</ul>
<p><a href="/">Back to home</a></p>"#,
    ))
}

pub async fn terms() -> Html<String> {
    Html(page(
        "Terms of Service",
        r#"<h1>Terms of Service</h1>
<h2>1. Agreement to Terms</h2>
<p>By accessing GigAfter you agree to be bound by these terms.</p>
<h2>2. Use License</h2>
<p>Permission is granted to use the materials on this site for personal, non-commercial viewing only.</p>
<h2>3. Disclaimer</h2>
<p>The materials are provided "as is" without warranties of any kind.</p>
<h2>4. Contact Us</h2>
<p>Questions about these terms can be sent to the GigAfter team.</p>"#,
    ))
}

pub async fn privacy() -> Html<String> {
    Html(page(
        "Privacy Policy",
        r#"<h1>Privacy Policy</h1>
<h2>1. Information We Collect</h2>
<p>Name, email address, phone number, venue address and other details you provide when signing up.</p>
<h2>2. Use of Your Information</h2>
<p>We use this information to manage the waitlist and contact you about GigAfter.</p>
<h2>3. Contact Us</h2>
<p>Questions about this policy can be sent to the GigAfter team.</p>"#,
    ))
}
