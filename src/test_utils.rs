use crate::models::domain::{QuizFormat, QuizItem};

#[cfg(test)]
pub mod fixtures {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;

    use super::*;

    /// Creates a multiple-choice item
    pub fn choice_item(id: &str, question: &str, options: &[&str], answer: &str) -> QuizItem {
        QuizItem {
            quiz_id: id.to_string(),
            format: QuizFormat::Choice,
            question_text: question.to_string(),
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            answer: answer.to_string(),
            explanation: format!("The answer is {}.", answer),
        }
    }

    /// Creates a free-response item
    pub fn write_item(id: &str, question: &str, answer: &str) -> QuizItem {
        QuizItem {
            quiz_id: id.to_string(),
            format: QuizFormat::Write,
            question_text: question.to_string(),
            options: None,
            answer: answer.to_string(),
            explanation: format!("The answer is {}.", answer),
        }
    }

    /// A two-question quiz mixing both formats
    pub fn sample_quiz() -> Vec<QuizItem> {
        vec![
            choice_item("q001", "2+2?", &["3", "4", "5"], "4"),
            write_item("q002", "Capital of France?", "Paris"),
        ]
    }

    /// Builds a minimal DOCX archive with one run per paragraph.
    pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| {
                let escaped = p.replace('&', "&amp;").replace('<', "&lt;");
                format!(
                    "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>\n",
                    escaped
                )
            })
            .collect();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>\n{}</w:body></w:document>",
            body
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .expect("start content types");
        writer
            .write_all(b"<?xml version=\"1.0\"?><Types/>")
            .expect("write content types");
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .expect("start document part");
        writer
            .write_all(xml.as_bytes())
            .expect("write document part");
        writer.finish().expect("finish docx").into_inner()
    }

    /// Builds a one-page PDF showing `text` in Helvetica.
    pub fn pdf_bytes(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", text);
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>".to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        pdf.extend_from_slice(xref.as_bytes());
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        pdf
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_quiz() {
        let quiz = sample_quiz();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[0].quiz_id, "q001");
        assert_eq!(quiz[1].options, None);
    }

    #[test]
    fn test_fixtures_pdf_has_valid_trailer() {
        let pdf = pdf_bytes("Hello");
        let text = String::from_utf8(pdf).unwrap();

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("(Hello) Tj"));
    }

    #[test]
    fn test_fixtures_docx_is_a_zip() {
        let docx = docx_bytes(&["one"]);
        assert_eq!(&docx[..2], b"PK");
    }
}
