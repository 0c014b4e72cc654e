// benches/reconcile.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use water_harvest::harvest::{locate, schema};
use water_harvest::specs::{DatasetKind, Payload};

/// Synthetic legacy rainfall page: nav table first, then the dual-header
/// data table with a per-day column block.
fn rainfall_page(rows: usize, dates: usize) -> String {
    let mut doc = String::from("<html><table><tr><td>nav</td></tr></table><table>");

    doc.push_str(
        "<tr><th>Bil.</th><th>ID Stesen</th><th>Nama Stesen</th><th>Daerah</th>\
         <th>Kemaskini Terakhir</th><th>Hujan Harian</th>\
         <th>Taburan Hujan dari Tengah Malam</th><th>Jumlah 1 Jam</th></tr><tr>",
    );
    for d in 0..dates {
        doc.push_str(&format!("<th>{:02}/08/2026</th>", d + 1));
    }
    doc.push_str("</tr>");

    for i in 0..rows {
        doc.push_str(&format!(
            "<tr><td>{}</td><td>RF{:04}</td><td>Stesen {}</td><td>Daerah</td>\
             <td>07/08/2026 10:00</td>",
            i + 1,
            i,
            i
        ));
        for d in 0..dates {
            doc.push_str(&format!("<td>{}.5</td>", d));
        }
        doc.push_str("<td>1.0</td><td>0.5</td></tr>");
    }
    doc.push_str("</table></html>");
    doc
}

fn bench_reconcile(c: &mut Criterion) {
    let doc = rainfall_page(200, 7);
    let spec = DatasetKind::Rainfall.spec();
    let Payload::Html(rules) = &spec.sources[0].payload else {
        panic!("legacy rainfall source is HTML");
    };

    c.bench_function("locate_table", |b| {
        b.iter(|| {
            let table = locate::locate_table(black_box(&doc), rules.hint_tokens).unwrap();
            black_box(table.len())
        })
    });

    c.bench_function("reconcile_validate", |b| {
        let table = locate::locate_table(&doc, rules.hint_tokens).unwrap();
        b.iter(|| {
            let shape = schema::reconcile(black_box(table), rules).unwrap();
            let (rows, dropped) = schema::validate_rows(&shape, rules);
            black_box((rows.len(), dropped))
        })
    });
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
