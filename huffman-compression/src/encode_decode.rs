use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::{debug, info};

use crate::{
    error::{HuffmanError, Result},
    frequency::FrequencyTable,
    header,
    prefix_code_table::{generate_codes, CodeTable},
    tree::{build_tree, Tree},
};

/// Encodes the file at `input_path` into `output_path`, creating or
/// overwriting it.
pub fn encode(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<()> {
    let (input_path, output_path) = (input_path.as_ref(), output_path.as_ref());
    let mut reader = open_input(input_path)?;
    let mut writer = BufWriter::new(File::create(output_path)?);

    encode_stream(&mut reader, &mut writer)?;
    writer.flush()?;

    info!(
        "encoded {} into {}",
        input_path.display(),
        output_path.display()
    );
    Ok(())
}

pub fn decode(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<()> {
    let (input_path, output_path) = (input_path.as_ref(), output_path.as_ref());
    let mut reader = open_input(input_path)?;
    let mut writer = BufWriter::new(File::create(output_path)?);

    decode_stream(&mut reader, &mut writer)?;
    writer.flush()?;

    info!(
        "decoded {} into {}",
        input_path.display(),
        output_path.display()
    );
    Ok(())
}

/// Returns whether the decoded output matches the input byte for byte.
pub fn encode_and_decode(
    input_path: impl AsRef<Path>,
    encoded_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<bool> {
    let (input_path, encoded_path, output_path) =
        (input_path.as_ref(), encoded_path.as_ref(), output_path.as_ref());

    encode(input_path, encoded_path)?;
    decode(encoded_path, output_path)?;

    let original = fs::read(input_path)?;
    let decoded = fs::read(output_path)?;
    debug!(
        "{} bytes in, {} encoded bytes, {} bytes out",
        original.len(),
        fs::metadata(encoded_path)?.len(),
        decoded.len()
    );

    Ok(original == decoded)
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => HuffmanError::InputNotFound(path.to_path_buf(), err),
            _ => err.into(),
        })
}

pub fn encode_stream<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<()> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;

    let frequencies = FrequencyTable::count(&content);
    let tree = match build_tree(&frequencies) {
        Some(tree) => tree,
        None => {
            debug!("input is empty, nothing to encode");
            return Ok(());
        }
    };

    writer.write_all(header::serialize(&frequencies).as_bytes())?;

    if tree.is_single_symbol() {
        debug!(
            "input is symbol {} repeated {} times, writing the header only",
            tree.root().symbol(),
            tree.weight()
        );
        return Ok(());
    }

    writer.write_all(b"\n")?;

    let codes = generate_codes(&tree);
    debug!(
        "encoding {} bytes with {} distinct symbols",
        content.len(),
        codes.len()
    );

    write_payload(&content, &codes, writer)
}

fn write_payload<W: Write>(content: &[u8], codes: &CodeTable, writer: &mut W) -> Result<()> {
    for &byte in content {
        let code = codes.get(byte).ok_or(HuffmanError::MissingCode(byte))?;
        writer.write_all(code.as_bytes())?;
    }
    Ok(())
}

pub fn decode_stream<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<()> {
    let header = read_line(reader)?;
    if header.is_empty() {
        debug!("header is empty, nothing to decode");
        return Ok(());
    }

    let header = std::str::from_utf8(&header)
        .map_err(|err| HuffmanError::malformed_header(format!("header is not text: {err}")))?;
    let frequencies = header::parse(header)?;
    let tree = build_tree(&frequencies)
        .ok_or_else(|| HuffmanError::malformed_header("header names no symbols"))?;

    if tree.is_single_symbol() {
        let root = tree.root();
        debug!(
            "header holds a single symbol {}, repeating it {} times",
            root.symbol(),
            root.weight()
        );
        io::copy(&mut io::repeat(root.symbol()).take(root.weight()), writer)?;
        return Ok(());
    }

    let payload = read_line(reader)?;
    debug!(
        "decoding {} payload bits for {} symbols",
        payload.len(),
        tree.weight()
    );

    let decoded = walk_payload(&tree, &payload, writer)?;
    if decoded != tree.weight() {
        return Err(HuffmanError::malformed_bitstream(format!(
            "payload holds {decoded} symbols but the header expects {}",
            tree.weight()
        )));
    }

    Ok(())
}

fn walk_payload<W: Write>(tree: &Tree, payload: &[u8], writer: &mut W) -> Result<u64> {
    let root = tree.root();
    let mut cursor = root;
    let mut code_length = 0_usize;
    let mut decoded = 0_u64;

    for (position, &bit) in payload.iter().enumerate() {
        let next = match bit {
            b'0' => cursor.left(),
            b'1' => cursor.right(),
            other => {
                return Err(HuffmanError::malformed_bitstream(format!(
                    "unexpected byte {other:#04x} at position {position}"
                )))
            }
        };
        cursor = next.ok_or_else(|| {
            HuffmanError::malformed_bitstream(format!(
                "bit at position {position} has no child to follow"
            ))
        })?;
        code_length += 1;

        if cursor.is_leaf() {
            writer.write_all(&[cursor.symbol()])?;
            decoded += 1;
            cursor = root;
            code_length = 0;
        }
    }

    if code_length != 0 {
        return Err(HuffmanError::malformed_bitstream(format!(
            "payload ends {code_length} bits into an incomplete code"
        )));
    }

    Ok(decoded)
}

// drops the `\n` or `\r\n` terminator
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(line)
}
