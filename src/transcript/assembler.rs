//! Sequences the fixed transcript document layout and emits PDF bytes.

use crate::document::Document;
use crate::error::Result;
use crate::graphics::Image;
use crate::layout::{
    draw_info_box, draw_section_title, Column, PaginationController, Row, TableLayout,
    HEADER_ROW_HEIGHT, MARGIN_LEFT,
};
use crate::text::Font;
use crate::transcript::{
    format_date, CodeEncoder, QrEncoder, Situacao, Titulacao, TranscriptRecord, ValidationStamp,
};
use std::path::PathBuf;
use tracing::{info, warn};

const LINE_HEIGHT: f64 = 11.0;
const BLOCK_GAP: f64 = 10.0;
const TITLE_BAR_HEIGHT: f64 = 14.0;
// A 10pt section title consumes its size plus 4pt of gap
const SECTION_TITLE_HEIGHT: f64 = 14.0;
const LOGO_SIZE: f64 = 48.0;
const QR_SIZE: f64 = 70.0;

/// Renders a [`TranscriptRecord`] into a complete multi-page PDF.
///
/// One renderer can serve many records; every call to [`render`]
/// produces an independent document.
///
/// [`render`]: TranscriptRenderer::render
pub struct TranscriptRenderer {
    validation_base_url: String,
    logo_path: Option<PathBuf>,
    encoder: Box<dyn CodeEncoder>,
}

impl TranscriptRenderer {
    pub fn new(validation_base_url: impl Into<String>) -> Self {
        Self {
            validation_base_url: validation_base_url.into(),
            logo_path: None,
            encoder: Box::new(QrEncoder),
        }
    }

    /// Sets the institutional logo embedded in the page header. A
    /// missing or unreadable file is logged and skipped at render time.
    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(path.into());
        self
    }

    pub fn with_encoder(mut self, encoder: Box<dyn CodeEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Renders the full transcript and returns the PDF byte stream.
    pub fn render(&self, record: &TranscriptRecord) -> Result<Vec<u8>> {
        let document = self.render_document(record)?;
        let mut buffer = Vec::new();
        document.write(&mut buffer)?;
        info!(
            pages = document.page_count(),
            subjects = record.subjects.len(),
            bytes = buffer.len(),
            "transcript rendered"
        );
        Ok(buffer)
    }

    /// Renders the transcript into an in-memory [`Document`] without
    /// serializing it.
    pub fn render_document(&self, record: &TranscriptRecord) -> Result<Document> {
        let table = subject_table()?;
        let mut ctl = PaginationController::new(
            table,
            record.institution.name.clone(),
            record.institution.subtitle.clone(),
        );

        self.draw_institutional_header(&mut ctl, record)?;
        draw_title_block(&mut ctl)?;
        draw_course_block(&mut ctl, record)?;
        draw_student_block(&mut ctl, record)?;
        draw_subject_table(&mut ctl, record)?;
        draw_situations_block(&mut ctl, record)?;
        draw_dates_block(&mut ctl, record)?;
        draw_aggregate_line(&mut ctl, record)?;
        self.draw_validation_block(&mut ctl)?;

        let mut document = ctl.finish()?;
        document.set_title(format!("Histórico Escolar - {}", record.student.name));
        document.set_author(record.institution.name.clone());
        Ok(document)
    }

    fn draw_institutional_header(
        &self,
        ctl: &mut PaginationController,
        record: &TranscriptRecord,
    ) -> Result<()> {
        let top = ctl.cursor();

        if let Some(ref path) = self.logo_path {
            match Image::from_jpeg_file(path) {
                Ok(logo) => {
                    let page = ctl.page();
                    page.add_image("Logo", logo);
                    page.draw_image("Logo", MARGIN_LEFT, top - LOGO_SIZE, LOGO_SIZE, LOGO_SIZE)?;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "logo unavailable, header rendered without it");
                }
            }
        }

        let mut y = ctl.cursor();
        y = draw_section_title(ctl.page(), &record.institution.name, y, 12.0)?;
        y = draw_section_title(ctl.page(), &record.institution.subtitle, y, 10.0)?;
        for line in &record.institution.compliance {
            y = draw_centered_line(ctl, line, Font::Helvetica, 7.0, y)?;
        }
        // Never let title lines overlap a taller logo
        ctl.set_cursor(y.min(top - LOGO_SIZE) - BLOCK_GAP);
        Ok(())
    }

    fn draw_validation_block(&self, ctl: &mut PaginationController) -> Result<()> {
        ctl.ensure_space(QR_SIZE + 4.0 * LINE_HEIGHT)?;

        let stamp = ValidationStamp::generate(&self.validation_base_url);
        let top = ctl.cursor();

        match self.encoder.encode(&stamp.verification_url) {
            Ok(image) => {
                let page = ctl.page();
                page.add_image("Validacao", image);
                page.draw_image("Validacao", MARGIN_LEFT, top - QR_SIZE, QR_SIZE, QR_SIZE)?;
            }
            Err(e) => {
                warn!(error = %e, "validation image unavailable, printing code as text only");
            }
        }

        let text_x = MARGIN_LEFT + QR_SIZE + BLOCK_GAP;
        let mut y = top - LINE_HEIGHT;
        for (font, size, line) in [
            (
                Font::Helvetica,
                7.0,
                "A autenticidade deste documento pode ser conferida no endereço abaixo.".to_string(),
            ),
            (Font::Helvetica, 7.0, stamp.verification_url.clone()),
            (
                Font::HelveticaBold,
                9.0,
                format!("Código de validação: {}", stamp.code),
            ),
            (
                Font::Helvetica,
                7.0,
                format!(
                    "Documento emitido em {}",
                    chrono::Local::now().format("%d/%m/%Y %H:%M")
                ),
            ),
        ] {
            ctl.page().text().set_font(font, size).at(text_x, y).write(&line)?;
            y -= LINE_HEIGHT;
        }

        ctl.set_cursor(top - QR_SIZE - BLOCK_GAP);
        Ok(())
    }
}

/// The fixed six-column subject table. The last column never truncates;
/// its abbreviations are short by construction.
fn subject_table() -> Result<TableLayout> {
    TableLayout::new(
        vec![
            Column::new("disciplina", "Disciplina", 200.0),
            Column::new("carga", "C.H.", 40.0),
            Column::new("nota", "Nota", 45.0),
            Column::new("situacao", "Situação", 60.0),
            Column::new("professor", "Professor", 120.0),
            Column::new("titulacao", "Titulação", 50.0).no_truncate(),
        ],
        595.0,
    )
}

fn draw_centered_line(
    ctl: &mut PaginationController,
    text: &str,
    font: Font,
    size: f64,
    y: f64,
) -> Result<f64> {
    let width = crate::text::measure_text(text, font, size);
    let x = (ctl.page().width() - width) / 2.0;
    ctl.page().text().set_font(font, size).at(x, y).write(text)?;
    Ok(y - size - 2.0)
}

fn draw_title_block(ctl: &mut PaginationController) -> Result<()> {
    let height = 20.0;
    ctl.ensure_space(height)?;
    let top = ctl.cursor();
    let width = crate::layout::printable_width(ctl.page().width());

    draw_info_box(ctl.page(), MARGIN_LEFT, top, width, height, None, true)?;
    draw_centered_line(ctl, "HISTÓRICO ESCOLAR", Font::HelveticaBold, 11.0, top - height + 6.0)?;
    ctl.set_cursor(top - height - BLOCK_GAP);
    Ok(())
}

fn draw_course_block(ctl: &mut PaginationController, record: &TranscriptRecord) -> Result<()> {
    let lines = [
        format!("Curso: {}", record.course.name),
        format!("Área: {}", record.course.area),
        format!("Modalidade: {} | Período: {}", record.course.modality, record.course.period),
    ];
    draw_text_block(ctl, "DADOS DO CURSO", &lines)
}

fn draw_student_block(ctl: &mut PaginationController, record: &TranscriptRecord) -> Result<()> {
    let s = &record.student;
    let lines = [
        format!("Nome: {} | CPF: {} | Matrícula: {}", s.name, s.cpf, s.matricula),
        format!("RG: {} | Órgão emissor: {}", s.rg, s.rg_issuer),
        format!(
            "Data de nascimento: {} | Nacionalidade: {}",
            format_date(s.birth_date),
            s.nationality
        ),
        format!("Data de ingresso: {}", format_date(s.admission_date)),
    ];
    draw_text_block(ctl, "DADOS DO ALUNO", &lines)
}

/// Draws a titled box sized to its lines and advances the cursor below
/// it.
fn draw_text_block(
    ctl: &mut PaginationController,
    title: &str,
    lines: &[String],
) -> Result<()> {
    let height = TITLE_BAR_HEIGHT + lines.len() as f64 * LINE_HEIGHT + 6.0;
    ctl.ensure_space(height)?;

    let top = ctl.cursor();
    let width = crate::layout::printable_width(ctl.page().width());
    draw_info_box(ctl.page(), MARGIN_LEFT, top, width, height, Some(title), false)?;

    let mut y = top - TITLE_BAR_HEIGHT - LINE_HEIGHT + 2.0;
    for line in lines {
        ctl.page()
            .text()
            .set_font(Font::Helvetica, 8.0)
            .at(MARGIN_LEFT + 4.0, y)
            .write(line)?;
        y -= LINE_HEIGHT;
    }

    ctl.set_cursor(top - height - BLOCK_GAP);
    Ok(())
}

fn draw_subject_table(ctl: &mut PaginationController, record: &TranscriptRecord) -> Result<()> {
    // Literal height of the section title plus the table header; the
    // multi-row break rule reserves the rows beneath them.
    ctl.ensure_space(SECTION_TITLE_HEIGHT + HEADER_ROW_HEIGHT)?;
    let top = ctl.cursor();
    let y = draw_section_title(ctl.page(), "DISCIPLINAS CURSADAS", top, 10.0)?;
    ctl.set_cursor(y);

    ctl.draw_table_header()?;
    for subject in &record.subjects {
        let row = Row::new()
            .set("disciplina", subject.name.clone())
            .set("carga", format!("{} h", subject.workload_hours))
            .set("nota", format!("{:.1}", subject.grade))
            .set("situacao", Situacao::from_grade(subject.grade).label())
            .set("professor", subject.teacher.clone())
            .set("titulacao", Titulacao::from_qualification(&subject.qualification).label());
        ctl.draw_row(&row)?;
    }
    ctl.end_table();
    ctl.advance(BLOCK_GAP);
    Ok(())
}

fn draw_situations_block(ctl: &mut PaginationController, record: &TranscriptRecord) -> Result<()> {
    ctl.ensure_space(LINE_HEIGHT)?;
    let y = ctl.cursor();
    ctl.page()
        .text()
        .set_font(Font::Helvetica, 8.0)
        .at(MARGIN_LEFT, y - LINE_HEIGHT)
        .write(&format!(
            "Período letivo: {} | Situação final: Formado",
            record.course.period
        ))?;
    ctl.set_cursor(y - LINE_HEIGHT - BLOCK_GAP);
    Ok(())
}

fn draw_dates_block(ctl: &mut PaginationController, record: &TranscriptRecord) -> Result<()> {
    let height = 2.0 * LINE_HEIGHT + 6.0;
    ctl.ensure_space(height)?;
    let top = ctl.cursor();
    let width = crate::layout::printable_width(ctl.page().width());
    let column_width = width / 3.0;

    let cells = [
        ("Data de conclusão", format_date(record.dates.conclusion)),
        ("Data de colação de grau", format_date(record.dates.graduation_ceremony)),
        ("Data de expedição do diploma", format_date(record.dates.diploma_issue)),
    ];

    for (i, (label, value)) in cells.iter().enumerate() {
        let x = MARGIN_LEFT + i as f64 * column_width;
        ctl.page()
            .text()
            .set_font(Font::Helvetica, 7.0)
            .at(x, top - LINE_HEIGHT)
            .write(label)?;
        ctl.page()
            .text()
            .set_font(Font::HelveticaBold, 9.0)
            .at(x, top - 2.0 * LINE_HEIGHT)
            .write(value)?;
    }

    ctl.set_cursor(top - height - BLOCK_GAP);
    Ok(())
}

fn draw_aggregate_line(ctl: &mut PaginationController, record: &TranscriptRecord) -> Result<()> {
    ctl.ensure_space(LINE_HEIGHT)?;
    let y = ctl.cursor();
    ctl.page()
        .text()
        .set_font(Font::HelveticaBold, 9.0)
        .at(MARGIN_LEFT, y - LINE_HEIGHT)
        .write(&format!(
            "Carga horária total: {} horas | Curso 100% concluído",
            record.completed_hours()
        ))?;
    ctl.set_cursor(y - LINE_HEIGHT - BLOCK_GAP);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{
        CompletionDates, CourseInfo, Institution, StudentIdentity, SubjectResult,
    };
    use chrono::NaiveDate;

    fn sample_record(subject_count: usize) -> TranscriptRecord {
        TranscriptRecord {
            institution: Institution {
                name: "Faculdade Exemplo de Tecnologia".into(),
                subtitle: "Curso Superior de Tecnologia".into(),
                compliance: [
                    "Credenciada pela Portaria MEC nº 123/2010".into(),
                    "Recredenciada pela Portaria MEC nº 456/2018".into(),
                    "CNPJ 00.000.000/0001-00".into(),
                ],
            },
            student: StudentIdentity {
                name: "Maria da Silva".into(),
                cpf: "123.456.789-00".into(),
                matricula: "20190001".into(),
                rg: "12.345.678-9".into(),
                rg_issuer: "SSP/SP".into(),
                birth_date: NaiveDate::from_ymd_opt(1999, 3, 7),
                nationality: "Brasileira".into(),
                admission_date: NaiveDate::from_ymd_opt(2019, 2, 1),
            },
            course: CourseInfo {
                name: "Análise e Desenvolvimento de Sistemas".into(),
                area: "Computação".into(),
                modality: "Presencial".into(),
                period: "2019/1 a 2022/2".into(),
            },
            subjects: (0..subject_count)
                .map(|i| SubjectResult {
                    name: format!("Disciplina {i:02}"),
                    workload_hours: 60,
                    grade: if i % 5 == 0 { 5.5 } else { 7.0 },
                    teacher: format!("Professor {i:02}"),
                    qualification: "Mestre em Computação".into(),
                })
                .collect(),
            dates: CompletionDates {
                conclusion: NaiveDate::from_ymd_opt(2022, 12, 10),
                graduation_ceremony: NaiveDate::from_ymd_opt(2023, 1, 20),
                diploma_issue: None,
            },
        }
    }

    #[test]
    fn test_render_returns_pdf_bytes() {
        let renderer = TranscriptRenderer::new("https://exemplo.edu.br/validar");
        let bytes = renderer.render(&sample_record(8)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_missing_logo_does_not_abort() {
        let renderer = TranscriptRenderer::new("https://exemplo.edu.br/validar")
            .with_logo("/nonexistent/logo.jpg");
        let bytes = renderer.render(&sample_record(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_grade_threshold_in_rows() {
        let mut record = sample_record(0);
        record.subjects.push(SubjectResult {
            name: "Limite".into(),
            workload_hours: 40,
            grade: 6.0,
            teacher: "Docente".into(),
            qualification: "Doutor em Exatas".into(),
        });
        let renderer = TranscriptRenderer::new("https://exemplo.edu.br/validar");
        let bytes = renderer.render(&record).unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("(Aprovado) Tj"));
        assert!(content.contains("(Dout.) Tj"));
        assert!(!content.contains("(Reprovado) Tj"));
    }

    #[test]
    fn test_table_geometry_fits_printable_width() {
        let table = subject_table().unwrap();
        assert!((table.total_width() - 515.0).abs() < 0.01);
    }
}
