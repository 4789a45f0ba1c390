use crate::models::Contact;

fn message_or_placeholder(contact: &Contact) -> &str {
    if contact.message.is_empty() {
        "No message provided"
    } else {
        &contact.message
    }
}

pub fn render_text(contact: &Contact) -> String {
    format!(
        "New Contact Form Submission\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Message: {}\n\n\
         Submitted at: {}\n",
        contact.name,
        contact.email,
        contact.phone,
        message_or_placeholder(contact),
        contact.created_at.to_rfc3339(),
    )
}

pub fn render_html(contact: &Contact) -> String {
    let name = &contact.name;
    let email = &contact.email;
    let phone = &contact.phone;
    let message = message_or_placeholder(contact);
    let submitted_at = contact.created_at.to_rfc3339();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>New Contact Form Submission</h2>
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
    <p><strong>Phone:</strong> <a href="tel:{phone}">{phone}</a></p>
    <p><strong>Message:</strong> {message}</p>
    <p style="color: #666; font-size: 14px; border-top: 1px solid #ddd; padding-top: 10px;">Submitted at: {submitted_at}</p>
</body>
</html>"#
    )
}
